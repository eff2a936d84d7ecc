// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PostgREST select query builder.

use crate::db::tables;

/// A related table embedded in a select (`table!hint(columns)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub table: String,
    /// Foreign-key constraint name that disambiguates the relationship
    pub hint: Option<String>,
    pub columns: String,
}

impl Embed {
    /// Embed relying on the backend to infer the relationship.
    pub fn inferred(table: &str, columns: &str) -> Self {
        Self {
            table: table.to_string(),
            hint: None,
            columns: columns.to_string(),
        }
    }

    /// Embed through an explicitly named foreign key.
    pub fn via(table: &str, foreign_key: &str, columns: &str) -> Self {
        Self {
            table: table.to_string(),
            hint: Some(foreign_key.to_string()),
            columns: columns.to_string(),
        }
    }

    fn render(&self) -> String {
        match &self.hint {
            Some(hint) => format!("{}!{}({})", self.table, hint, self.columns),
            None => format!("{}({})", self.table, self.columns),
        }
    }
}

/// A `GET /rest/v1/{table}` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    table: String,
    columns: String,
    embeds: Vec<Embed>,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl SelectQuery {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: "*".to_string(),
            embeds: Vec::new(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn embeds(&self) -> &[Embed] {
        &self.embeds
    }

    /// Add a raw PostgREST filter, e.g. `filter("vistas", "gte.10")`.
    pub fn filter(mut self, column: &str, expr: &str) -> Self {
        self.filters.push((column.to_string(), expr.to_string()));
        self
    }

    pub fn eq(self, column: &str, value: &str) -> Self {
        self.filter(column, &format!("eq.{}", value))
    }

    pub fn not_null(self, column: &str) -> Self {
        self.filter(column, "not.is.null")
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(format!("{}.desc", column));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The `select=` value.
    pub fn select_param(&self) -> String {
        let mut parts = vec![self.columns.clone()];
        parts.extend(self.embeds.iter().map(Embed::render));
        parts.join(",")
    }

    /// All query-string pairs, in a stable order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select_param())];
        pairs.extend(self.filters.iter().cloned());
        if let Some(order) = &self.order {
            pairs.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Which videos to sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoFilter {
    pub premium_only: bool,
    /// Only rows with a non-null thumbnail
    pub with_thumbnail: bool,
    pub limit: Option<usize>,
}

impl VideoFilter {
    pub fn to_query(&self) -> SelectQuery {
        let mut query = SelectQuery::new(tables::VIDEOS)
            .columns("id,titulo,thumbnail,es_premium,categoria,nivel,duracion,video_url,vistas,descripcion");
        if self.premium_only {
            query = query.eq("es_premium", "true");
        }
        if self.with_thumbnail {
            query = query.not_null("thumbnail");
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        query
    }
}
