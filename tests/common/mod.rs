//! Shared on-disk collection fixture.
#![allow(dead_code)]

use std::path::PathBuf;

use lux::store::{schema, Store};
use rusqlite::Connection;
use tempfile::TempDir;

/// Seeded store. The directory is removed when the fixture drops.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn store(&self) -> Store {
        Store::new(&self.path)
    }

    pub fn distinct_agents(&self, obj_id: i64) -> usize {
        let conn = Connection::open(&self.path).unwrap();
        conn.query_row(
            "SELECT COUNT(DISTINCT agt_id) FROM productions WHERE obj_id = ?1",
            [obj_id],
            |row| row.get::<_, i64>(0),
        )
        .unwrap() as usize
    }
}

/// Objects:
///
/// | id | label | agents | classifiers | references |
/// |----|-------|--------|-------------|------------|
/// | 1 | Still Life with Fruit | Claude Monet (French, Italian) | Paintings, Oil | 2 |
/// | 2 | Vase with Handles | Anonymous Potter, Studio Workshop (Dutch) | Ceramics | 0 |
/// | 3 | Fragment | - | - | - |
/// | 4 | 100% Wool Sample | - | Textiles | - |
/// | 5 | Broken Date | Undated Maker (begin "circa 1900") | - | - |
pub const SEED: &str = r#"
    INSERT INTO objects (id, accession_no, label, date) VALUES
        (1, '1900.1', 'Still Life with Fruit', '1890'),
        (2, '1910.7', 'Vase with Handles', '1905'),
        (3, '1920.3', 'Fragment', NULL),
        (4, '1950.2', '100% Wool Sample', '1950'),
        (5, '1960.9', 'Broken Date', '1901');

    INSERT INTO agents (id, name, begin_date, end_date) VALUES
        (10, 'Claude Monet', '1840-11-14', '1926-12-05'),
        (11, 'Anonymous Potter', NULL, NULL),
        (12, 'Studio Workshop', '1880-01-01', NULL),
        (13, 'Undated Maker', 'circa 1900', NULL);

    INSERT INTO productions (obj_id, agt_id, part) VALUES
        (1, 10, 'painter'),
        (2, 11, 'potter'),
        (2, 12, NULL),
        (5, 13, 'maker');

    INSERT INTO nationalities (id, descriptor) VALUES
        (1, 'French'), (2, 'Italian'), (3, 'Dutch');

    INSERT INTO agents_nationalities (agt_id, nat_id) VALUES
        (10, 1), (10, 2), (12, 3);

    INSERT INTO classifiers (id, name) VALUES
        (1, 'Paintings'), (2, 'Oil'), (3, 'Ceramics'), (4, 'Textiles');

    INSERT INTO objects_classifiers (obj_id, cls_id) VALUES
        (1, 1), (1, 2), (2, 3), (4, 4);

    INSERT INTO "references" (id, obj_id, type, content) VALUES
        (1, 1, 'Bibliography', 'Catalogue raisonne, no. 12'),
        (2, 1, 'Exhibition', 'Paris 1900');

    INSERT INTO departments (id, name) VALUES
        (1, 'European Art'), (2, 'Decorative Arts');

    INSERT INTO objects_departments (obj_id, dep_id) VALUES
        (1, 1), (2, 2), (4, 2);

    INSERT INTO places (id, label) VALUES (1, 'Paris');

    INSERT INTO objects_places (obj_id, pl_id) VALUES (1, 1);
"#;

pub fn collection() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lux.sqlite");

    let conn = Connection::open(&path).unwrap();
    schema::create_tables(&conn).unwrap();
    conn.execute_batch(SEED).unwrap();

    Fixture { _dir: dir, path }
}
