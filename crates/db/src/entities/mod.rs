//! `SeaORM` entity definitions.

pub mod patients;
