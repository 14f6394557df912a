//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.
//! Identifiers only ever come from here; request payloads are mapped onto
//! these columns through typed changesets, never spliced into SQL.

diesel::table! {
    /// Internal MRO jobs.
    ///
    /// One row per maintenance job on an aircraft. `id` defaults to a
    /// server-generated UUID.
    internal_mro_jobs (id) {
        /// Primary key: UUID generated by the database.
        id -> Uuid,
        /// Short description of the work.
        title -> Text,
        /// Registration number of the aircraft being serviced.
        aircraft_reg_no -> Text,
        /// Engineer the job is assigned to.
        assigned_engineer -> Nullable<Text>,
        /// Scheduled maintenance date.
        maintenance_date -> Nullable<Date>,
        /// Workflow state; legacy imports may be NULL.
        status -> Nullable<Text>,
        /// Record creation timestamp; orders list reads.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Repair job tracker.
    ///
    /// One row per customer repair job with its paperwork trail. All
    /// date/number paperwork pairs are independently nullable.
    job_tracker (id) {
        /// Primary key: UUID generated by the database.
        id -> Uuid,
        /// Customer the repair is performed for.
        customer -> Text,
        /// Description of the unit under repair.
        description -> Text,
        /// Manufacturer part number; empty when unknown.
        part_number -> Text,
        /// Unit serial number; empty when unknown.
        serial_number -> Text,
        /// Customer purchase-order number.
        lpo_number -> Nullable<Text>,
        /// Customer purchase-order date.
        lpo_date -> Nullable<Date>,
        /// Repair-order number.
        ro_number -> Nullable<Text>,
        /// Repair-order date.
        kq_repair_order_date -> Nullable<Date>,
        /// Internal job card number.
        job_card_no -> Text,
        /// Job card date.
        job_card_date -> Nullable<Date>,
        /// Works-order number.
        kq_works_order_wo_no -> Nullable<Text>,
        /// Works-order date.
        kq_works_order_date -> Nullable<Date>,
        /// Workflow state.
        job_status -> Text,
        /// Date the workflow state last changed.
        job_status_date -> Nullable<Date>,
        /// Whether the job card has been shared with finance.
        job_card_shared_with_finance -> Text,
        /// Record creation timestamp; orders list reads.
        created_at -> Timestamptz,
    }
}
