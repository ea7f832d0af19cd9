//! Typed query functions against the relational store.
pub mod meetup_service;
