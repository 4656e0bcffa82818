//! Detail query: the full record of one object.

use rusqlite::Row;
use serde::Serialize;

use super::{CleanRows, FormatRows, QueryError, QueryResult, Search, DEFAULT_ROW_LIMIT};
use crate::model::{AgentId, ObjectId};
use crate::normalize::{normalize, AgentRow, DetailRow, Normalized, ObjectRecord};
use crate::sql::{param, table_col, ExprExt, Query, Statement};
use crate::store::schema::{
    agents, agents_nationalities, classifiers, nationalities, objects, objects_classifiers,
    objects_places, places, productions, references,
};
use crate::store::Store;

/// Column headers of the "produced by" table.
pub const COLUMNS_PRODUCED_BY: [&str; 4] = ["Part", "Name", "Timespan", "Nationalities"];
/// Column headers of the "information" (reference) table.
pub const COLUMNS_INFORMATION: [&str; 2] = ["Type", "Content"];
/// Front-end display hints for the reference table columns.
pub const FORMAT_INFORMATION: [&str; 2] = ["w", "w"];
/// Front-end display hints for the agent table columns.
pub const FORMAT_PRODUCED: [&str; 4] = ["w", "w", "p", "w"];

/// Payload of a successful detail query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailResponse {
    pub columns_produced_by: &'static [&'static str],
    pub columns_information: &'static [&'static str],
    pub format_information: &'static [&'static str],
    pub format_produced: &'static [&'static str],
    pub agents: Vec<AgentRow>,
    pub object: ObjectRecord,
}

/// The single `SELECT DISTINCT` that flattens an object with all of its
/// one-to-many relations. Every join is outer, so an object with no agents,
/// references or classifiers still yields a row.
pub fn detail_statement(id: ObjectId) -> Statement {
    Query::new()
        .distinct()
        .select(vec![
            table_col(objects::TABLE, objects::LABEL),
            table_col(objects::TABLE, objects::DATE),
            table_col(places::TABLE, places::LABEL),
            table_col(productions::TABLE, productions::PART),
            table_col(agents::TABLE, agents::NAME),
            table_col(agents::TABLE, agents::BEGIN_DATE),
            table_col(agents::TABLE, agents::END_DATE),
            table_col(nationalities::TABLE, nationalities::DESCRIPTOR),
            table_col(classifiers::TABLE, classifiers::NAME),
            table_col(references::TABLE, references::TYPE),
            table_col(references::TABLE, references::CONTENT),
            table_col(agents::TABLE, agents::ID),
        ])
        .from(objects::TABLE)
        .left_join(
            productions::TABLE,
            table_col(productions::TABLE, productions::OBJ_ID)
                .eq(table_col(objects::TABLE, objects::ID)),
        )
        .left_join(
            agents::TABLE,
            table_col(productions::TABLE, productions::AGT_ID)
                .eq(table_col(agents::TABLE, agents::ID)),
        )
        .left_join(
            agents_nationalities::TABLE,
            table_col(agents_nationalities::TABLE, agents_nationalities::AGT_ID)
                .eq(table_col(agents::TABLE, agents::ID)),
        )
        .left_join(
            nationalities::TABLE,
            table_col(nationalities::TABLE, nationalities::ID).eq(table_col(
                agents_nationalities::TABLE,
                agents_nationalities::NAT_ID,
            )),
        )
        .left_join(
            references::TABLE,
            table_col(references::TABLE, references::OBJ_ID)
                .eq(table_col(objects::TABLE, objects::ID)),
        )
        .left_join(
            objects_classifiers::TABLE,
            table_col(objects_classifiers::TABLE, objects_classifiers::OBJ_ID)
                .eq(table_col(objects::TABLE, objects::ID)),
        )
        .left_join(
            classifiers::TABLE,
            table_col(classifiers::TABLE, classifiers::ID).eq(table_col(
                objects_classifiers::TABLE,
                objects_classifiers::CLS_ID,
            )),
        )
        .left_join(
            objects_places::TABLE,
            table_col(objects_places::TABLE, objects_places::OBJ_ID)
                .eq(table_col(objects::TABLE, objects::ID)),
        )
        .left_join(
            places::TABLE,
            table_col(places::TABLE, places::ID)
                .eq(table_col(objects_places::TABLE, objects_places::PL_ID)),
        )
        .filter(table_col(objects::TABLE, objects::ID).eq(param(id.0)))
        .build()
}

fn read_detail_row(row: &Row<'_>) -> rusqlite::Result<DetailRow> {
    Ok(DetailRow {
        label: row.get(0)?,
        date: row.get(1)?,
        place: row.get(2)?,
        part: row.get(3)?,
        agent_name: row.get(4)?,
        begin_date: row.get(5)?,
        end_date: row.get(6)?,
        nationality: row.get(7)?,
        classifier: row.get(8)?,
        ref_type: row.get(9)?,
        ref_content: row.get(10)?,
        agent_id: row.get::<_, Option<i64>>(11)?.map(AgentId),
    })
}

/// Lookup by object id.
#[derive(Debug, Clone)]
pub struct DetailQuery {
    store: Store,
    agent_limit: usize,
}

impl DetailQuery {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            agent_limit: DEFAULT_ROW_LIMIT,
        }
    }

    /// Cap the number of agent rows in a response.
    pub fn with_agent_limit(mut self, limit: usize) -> Self {
        self.agent_limit = limit;
        self
    }
}

impl CleanRows for DetailQuery {
    type Row = DetailRow;
    type Clean = Normalized;

    fn clean_rows(&self, rows: Vec<DetailRow>) -> QueryResult<Normalized> {
        normalize(&rows)?.ok_or(QueryError::NotFound)
    }
}

impl FormatRows for DetailQuery {
    type Response = DetailResponse;

    fn format_rows(&self, clean: Normalized) -> DetailResponse {
        DetailResponse {
            columns_produced_by: &COLUMNS_PRODUCED_BY,
            columns_information: &COLUMNS_INFORMATION,
            format_information: &FORMAT_INFORMATION,
            format_produced: &FORMAT_PRODUCED,
            agents: clean.agent_rows(self.agent_limit),
            object: clean.object,
        }
    }
}

impl Search for DetailQuery {
    type Request = ObjectId;

    fn fetch_rows(&self, id: &ObjectId) -> QueryResult<Vec<DetailRow>> {
        let rows = self
            .store
            .query_rows(&detail_statement(*id), read_detail_row)?;
        if rows.is_empty() {
            return Err(QueryError::NotFound);
        }
        Ok(rows)
    }
}
