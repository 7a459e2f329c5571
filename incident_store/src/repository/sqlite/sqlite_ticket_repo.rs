use rusqlite::types::ToSql;
use rusqlite::Row;

use crate::repository::sqlite::sqlite_repository::{
    timestamp_column, SqliteRepository, TableSchema,
};
use crate::types::{NewTicket, Ticket};

/// `it_tickets`, addressed by the business identifier `ticket_id`
pub struct TicketTable;

pub type SqliteTicketRepository = SqliteRepository<TicketTable>;

impl TableSchema for TicketTable {
    type Record = Ticket;
    type NewRecord = NewTicket;
    type Key = str;

    const TABLE: &'static str = "it_tickets";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "ticket_id",
        "priority",
        "status",
        "category",
        "subject",
        "description",
        "created_date",
        "resolved_date",
        "assigned_to",
        "created_at",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "ticket_id",
        "priority",
        "status",
        "category",
        "subject",
        "description",
        "created_date",
        "resolved_date",
        "assigned_to",
    ];
    const KEY_COLUMN: &'static str = "ticket_id";
    const MUTABLE_COLUMN: &'static str = "status";
    const ORDER_BY: &'static str = "id ASC";

    fn insert_params(ticket: &NewTicket) -> Vec<&dyn ToSql> {
        vec![
            &ticket.ticket_id as &dyn ToSql,
            &ticket.priority,
            &ticket.status,
            &ticket.category,
            &ticket.subject,
            &ticket.description,
            &ticket.created_date,
            &ticket.resolved_date,
            &ticket.assigned_to,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Ticket> {
        Ok(Ticket {
            id: row.get(0)?,
            ticket_id: row.get(1)?,
            priority: row.get(2)?,
            status: row.get(3)?,
            category: row.get(4)?,
            subject: row.get(5)?,
            description: row.get(6)?,
            created_date: row.get(7)?,
            resolved_date: row.get(8)?,
            assigned_to: row.get(9)?,
            created_at: timestamp_column(row, 10)?,
        })
    }
}
