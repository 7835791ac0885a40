//! [`Record`](crate::Record) implementations, one module per entity family

mod book;
mod genre;
mod movie;
mod music;
mod serie;
mod software;
