//! Filter query: objects matching optional substring predicates.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{CleanRows, FormatRows, QueryResult, Search, DEFAULT_ROW_LIMIT};
use crate::sql::{
    exists, group_concat_distinct, lit_int, table_col, Expr, ExprExt, OrderByExpr, Query,
    SelectExpr, Statement,
};
use crate::store::schema::{
    agents, classifiers, departments, objects, objects_classifiers, objects_departments,
    productions,
};
use crate::store::Store;

/// Column headers of a filter response, one per [`FilterRow`] field.
pub const COLUMNS: [&str; 5] = ["ID", "Label", "Date", "Agents", "Classified As"];

/// Optional predicates of a filter query. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    pub label: Option<String>,
    pub classifier: Option<String>,
    pub agent: Option<String>,
    pub department: Option<String>,
}

/// One result row: `[id, label, date, agents, classifiers]`.
///
/// Agent and classifier names are comma-joined per object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterRow(
    pub i64,
    pub Option<String>,
    pub Option<String>,
    pub Option<String>,
    pub Option<String>,
);

/// Payload of a successful filter query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResponse {
    pub columns: &'static [&'static str],
    pub data: Vec<FilterRow>,
}

/// A name reached from `objects` through a link table.
struct Linked {
    link: &'static str,
    link_obj_id: &'static str,
    link_target_id: &'static str,
    target: &'static str,
    target_id: &'static str,
    target_name: &'static str,
}

const AGENT_NAME: Linked = Linked {
    link: productions::TABLE,
    link_obj_id: productions::OBJ_ID,
    link_target_id: productions::AGT_ID,
    target: agents::TABLE,
    target_id: agents::ID,
    target_name: agents::NAME,
};

const CLASSIFIER_NAME: Linked = Linked {
    link: objects_classifiers::TABLE,
    link_obj_id: objects_classifiers::OBJ_ID,
    link_target_id: objects_classifiers::CLS_ID,
    target: classifiers::TABLE,
    target_id: classifiers::ID,
    target_name: classifiers::NAME,
};

const DEPARTMENT_NAME: Linked = Linked {
    link: objects_departments::TABLE,
    link_obj_id: objects_departments::OBJ_ID,
    link_target_id: objects_departments::DEP_ID,
    target: departments::TABLE,
    target_id: departments::ID,
    target_name: departments::NAME,
};

impl Linked {
    /// `EXISTS` over the object's linked names. Matching lives in a
    /// subquery so the aggregate columns still list every linked name.
    fn contains(&self, text: &str) -> Expr {
        exists(
            Query::new()
                .select(vec![lit_int(1)])
                .from(self.link)
                .inner_join(
                    self.target,
                    table_col(self.target, self.target_id)
                        .eq(table_col(self.link, self.link_target_id)),
                )
                .filter(
                    table_col(self.link, self.link_obj_id)
                        .eq(table_col(objects::TABLE, objects::ID)),
                )
                .filter(table_col(self.target, self.target_name).contains(text)),
        )
    }
}

/// Build the filter statement. Each present predicate is `AND`-ed in as a
/// case-insensitive substring match on a bound parameter.
pub fn filter_statement(params: &FilterParams, limit: usize) -> Statement {
    let label = params
        .label
        .as_deref()
        .map(|text| table_col(objects::TABLE, objects::LABEL).contains(text));
    let classifier = params
        .classifier
        .as_deref()
        .map(|text| CLASSIFIER_NAME.contains(text));
    let agent = params.agent.as_deref().map(|text| AGENT_NAME.contains(text));
    let department = params
        .department
        .as_deref()
        .map(|text| DEPARTMENT_NAME.contains(text));

    Query::new()
        .select(vec![
            SelectExpr::new(table_col(objects::TABLE, objects::ID)),
            SelectExpr::new(table_col(objects::TABLE, objects::LABEL)),
            SelectExpr::new(table_col(objects::TABLE, objects::DATE)),
            SelectExpr::new(group_concat_distinct(table_col(agents::TABLE, agents::NAME)))
                .with_alias("agents"),
            SelectExpr::new(group_concat_distinct(table_col(
                classifiers::TABLE,
                classifiers::NAME,
            )))
            .with_alias("classifiers"),
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
        .filter_opt(label)
        .filter_opt(classifier)
        .filter_opt(agent)
        .filter_opt(department)
        .group_by(vec![table_col(objects::TABLE, objects::ID)])
        .order_by(vec![
            OrderByExpr::asc(table_col(objects::TABLE, objects::LABEL)),
            OrderByExpr::asc(table_col(objects::TABLE, objects::DATE)),
            OrderByExpr::asc(table_col(objects::TABLE, objects::ID)),
        ])
        .limit(limit as u64)
        .build()
}

fn read_filter_row(row: &Row<'_>) -> rusqlite::Result<FilterRow> {
    Ok(FilterRow(
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

/// Lookup by optional label/classifier/agent/department predicates.
#[derive(Debug, Clone)]
pub struct FilterQuery {
    store: Store,
    row_limit: usize,
}

impl FilterQuery {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }

    /// Cap the number of rows in a response.
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = limit;
        self
    }
}

impl CleanRows for FilterQuery {
    type Row = FilterRow;
    type Clean = Vec<FilterRow>;

    /// Filter rows are already one per object; only the cap is enforced.
    fn clean_rows(&self, mut rows: Vec<FilterRow>) -> QueryResult<Vec<FilterRow>> {
        rows.truncate(self.row_limit);
        Ok(rows)
    }
}

impl FormatRows for FilterQuery {
    type Response = FilterResponse;

    fn format_rows(&self, clean: Vec<FilterRow>) -> FilterResponse {
        FilterResponse {
            columns: &COLUMNS,
            data: clean,
        }
    }
}

impl Search for FilterQuery {
    type Request = FilterParams;

    fn fetch_rows(&self, params: &FilterParams) -> QueryResult<Vec<FilterRow>> {
        let statement = filter_statement(params, self.row_limit);
        Ok(self.store.query_rows(&statement, read_filter_row)?)
    }
}
