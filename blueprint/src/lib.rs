#![doc = include_str!("../README.md")]

pub mod circuit;
pub mod column;
pub mod component;
pub mod components;
pub mod config;
pub mod error;
pub mod export;
pub mod expr;
pub mod manifest;
pub mod resolve;
pub mod satisfiability;
pub mod selector;
pub mod table;
pub mod var;
