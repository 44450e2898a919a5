//! # Route Module
//!
//! Routes and the collections that hold them.
//!
//! ## Overview
//!
//! A [`Route`] is an immutable-after-construction pattern (static segments
//! plus `{variable}` segments occupying whole segments), with default
//! parameter values, per-variable requirement regexes, allowed HTTP methods
//! and schemes, and an optional reference to a content object.
//!
//! Collections come in four shapes, all implementing the [`Routes`]
//! contract so consumers never assume the full backing store has been
//! materialized:
//!
//! - [`RouteCollection`] - plain insertion-ordered name → route map
//! - [`ChainRouteCollection`] - composes child collections lazily without
//!   copying, delegating lookups to each in turn
//! - [`LazyRouteCollection`] - delegates every access to a route provider
//! - [`PagedRouteCollection`] - iterates a paged provider in fixed-size
//!   batches

mod collection;
mod core;
mod lazy;

pub use collection::{ChainRouteCollection, RouteCollection, Routes};
pub use core::Route;
pub use lazy::{LazyRouteCollection, PagedRouteCollection};
