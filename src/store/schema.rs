//! Table and column names of the collection store.
//!
//! Every one-to-many relation hangs off `objects` or `agents`:
//!
//! ```text
//! objects ─< productions >─ agents ─< agents_nationalities >─ nationalities
//!    │
//!    ├─< references
//!    ├─< objects_classifiers >─ classifiers
//!    ├─< objects_departments >─ departments
//!    └─< objects_places >─ places
//! ```

use rusqlite::Connection;

pub mod objects {
    pub const TABLE: &str = "objects";
    pub const ID: &str = "id";
    pub const LABEL: &str = "label";
    pub const DATE: &str = "date";
}

pub mod agents {
    pub const TABLE: &str = "agents";
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const BEGIN_DATE: &str = "begin_date";
    pub const END_DATE: &str = "end_date";
}

pub mod productions {
    pub const TABLE: &str = "productions";
    pub const OBJ_ID: &str = "obj_id";
    pub const AGT_ID: &str = "agt_id";
    pub const PART: &str = "part";
}

pub mod nationalities {
    pub const TABLE: &str = "nationalities";
    pub const ID: &str = "id";
    pub const DESCRIPTOR: &str = "descriptor";
}

pub mod agents_nationalities {
    pub const TABLE: &str = "agents_nationalities";
    pub const AGT_ID: &str = "agt_id";
    pub const NAT_ID: &str = "nat_id";
}

pub mod classifiers {
    pub const TABLE: &str = "classifiers";
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
}

pub mod objects_classifiers {
    pub const TABLE: &str = "objects_classifiers";
    pub const OBJ_ID: &str = "obj_id";
    pub const CLS_ID: &str = "cls_id";
}

/// `references` is a reserved word; the builder always quotes identifiers.
pub mod references {
    pub const TABLE: &str = "references";
    pub const OBJ_ID: &str = "obj_id";
    pub const TYPE: &str = "type";
    pub const CONTENT: &str = "content";
}

pub mod departments {
    pub const TABLE: &str = "departments";
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
}

pub mod objects_departments {
    pub const TABLE: &str = "objects_departments";
    pub const OBJ_ID: &str = "obj_id";
    pub const DEP_ID: &str = "dep_id";
}

pub mod places {
    pub const TABLE: &str = "places";
    pub const ID: &str = "id";
    pub const LABEL: &str = "label";
}

pub mod objects_places {
    pub const TABLE: &str = "objects_places";
    pub const OBJ_ID: &str = "obj_id";
    pub const PL_ID: &str = "pl_id";
}

const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS objects (
        id INTEGER PRIMARY KEY,
        accession_no TEXT,
        label TEXT,
        date TEXT
    );

    CREATE TABLE IF NOT EXISTS agents (
        id INTEGER PRIMARY KEY,
        name TEXT,
        begin_date TEXT,
        end_date TEXT
    );

    CREATE TABLE IF NOT EXISTS productions (
        obj_id INTEGER NOT NULL REFERENCES objects(id),
        agt_id INTEGER NOT NULL REFERENCES agents(id),
        part TEXT
    );

    CREATE TABLE IF NOT EXISTS nationalities (
        id INTEGER PRIMARY KEY,
        descriptor TEXT
    );

    CREATE TABLE IF NOT EXISTS agents_nationalities (
        agt_id INTEGER NOT NULL REFERENCES agents(id),
        nat_id INTEGER NOT NULL REFERENCES nationalities(id)
    );

    CREATE TABLE IF NOT EXISTS classifiers (
        id INTEGER PRIMARY KEY,
        name TEXT
    );

    CREATE TABLE IF NOT EXISTS objects_classifiers (
        obj_id INTEGER NOT NULL REFERENCES objects(id),
        cls_id INTEGER NOT NULL REFERENCES classifiers(id)
    );

    CREATE TABLE IF NOT EXISTS "references" (
        id INTEGER PRIMARY KEY,
        obj_id INTEGER NOT NULL REFERENCES objects(id),
        type TEXT,
        content TEXT
    );

    CREATE TABLE IF NOT EXISTS departments (
        id INTEGER PRIMARY KEY,
        name TEXT
    );

    CREATE TABLE IF NOT EXISTS objects_departments (
        obj_id INTEGER NOT NULL REFERENCES objects(id),
        dep_id INTEGER NOT NULL REFERENCES departments(id)
    );

    CREATE TABLE IF NOT EXISTS places (
        id INTEGER PRIMARY KEY,
        label TEXT
    );

    CREATE TABLE IF NOT EXISTS objects_places (
        obj_id INTEGER NOT NULL REFERENCES objects(id),
        pl_id INTEGER NOT NULL REFERENCES places(id)
    );
"#;

/// Create the collection schema on `conn`.
///
/// The server itself only ever reads; this exists for fixtures and for
/// seeding a fresh store.
pub fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_TABLES)
}
