//! Route patterns and the declarative dispatch table

pub mod pattern;
pub mod table;

pub use pattern::RoutePattern;
pub use table::{handler, Handler, RequestContext, RouteTable};
