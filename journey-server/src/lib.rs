//! Van journey dashboard server.
//!
//! A web application that shows where a van trip has been: a map of
//! travel segments coloured by how they were travelled, filterable by
//! transport mode, country and date, alongside trip statistics and an
//! editable journal.

pub mod cache;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod gateway;
pub mod journal;
pub mod map;
pub mod route_filter;
pub mod web;
