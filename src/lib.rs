//! A typed URL path router.
//!
//! ```
//! use waypath::{int, int64, method, root, string, MatchResult, Method, Pattern, Router};
//!
//! let user = (root() / "user" / string() / int64()).strict();
//! assert_eq!(user.to_string(), "/user/:string/:int64");
//! assert_eq!(user.generate(("foobar".to_owned(), 56121111)), "/user/foobar/56121111");
//!
//! let router = Router::new(vec![
//! 	(root() / "sum" / int() / int()).strict().to(|a: i32, b: i32| i64::from(a + b)),
//! 	method(Method::GET, user).to(|_name: String, id: i64| id),
//! ]);
//!
//! assert_eq!(router.recognize("/sum/45/12", None), MatchResult::FullMatch(57));
//! assert_eq!(router.recognize("/sum/45/12/", None), MatchResult::MatchWithTrailingSlash(57));
//! assert_eq!(router.recognize("/sum/45/abc", None), MatchResult::NoMatch);
//! assert_eq!(router.recognize("/user/JohnUser/1", Some(&Method::GET)), MatchResult::FullMatch(1));
//! assert_eq!(router.recognize("/user/JohnUser/1", Some(&Method::POST)), MatchResult::NoMatch);
//! ```
//!
//! Patterns are composed with `/` from literals (`"sum"` or [`lit`]) and captures ([`int`],
//! [`int64`], [`string`], [`boolean`], [`int_in`], or [`capture`] with a custom [`Matcher`]),
//! optionally ending in [`rest`], which takes the remainder of the path. Each capture adds its
//! type to the pattern's argument list, so a handler only attaches to a pattern whose captures
//! line up with its parameters, and [`Path::generate`] only takes arguments of those types.
//!
//! Routes are tried in declaration order and the first match wins. A pattern closed with
//! [`strict`](Pattern::strict) reports a single extra trailing slash as
//! [`MatchResult::MatchWithTrailingSlash`], leaving the redirect decision to the caller.

pub use http::Method;

/// Type-level lists of captured values.
pub mod hlist;

/// Pattern nodes, composition and printing.
pub mod path;

/// Handlers and routes.
pub mod route;

/// The match engine.
///
/// Build a router from a list of routes, or with the [`RouterBuilder`] to configure
/// [`Router::dispatch`].
pub mod router;

/// Single-segment matchers.
pub mod segment;

pub use hlist::{Concat, HCons, HList, HNil};
pub use path::*;
pub use route::*;
pub use router::*;
pub use segment::Matcher;
