use crate::{route::Route, Method};
use std::{
	fmt::{self, Debug, Formatter},
	iter::FromIterator,
};
use tracing::{debug, trace};

/// The outcome of matching a path against a router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchResult<T> {
	NoMatch,
	FullMatch(T),
	/// The path matched a strict pattern apart from one extra trailing slash.
	MatchWithTrailingSlash(T),
}

impl<T> MatchResult<T> {
	pub fn map<U, F>(self, f: F) -> MatchResult<U>
	where
		F: FnOnce(T) -> U,
	{
		match self {
			MatchResult::NoMatch => MatchResult::NoMatch,
			MatchResult::FullMatch(value) => MatchResult::FullMatch(f(value)),
			MatchResult::MatchWithTrailingSlash(value) => MatchResult::MatchWithTrailingSlash(f(value)),
		}
	}

	pub fn is_match(&self) -> bool {
		!matches!(self, MatchResult::NoMatch)
	}

	/// The matched value, whichever way it matched.
	pub fn into_option(self) -> Option<T> {
		match self {
			MatchResult::NoMatch => None,
			MatchResult::FullMatch(value) | MatchResult::MatchWithTrailingSlash(value) => Some(value),
		}
	}
}

/// An input path split into segments.
///
/// One leading `/` is removed and one trailing `/` is recorded as a flag rather than an empty
/// segment. The root has no segments and no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Input<'a> {
	pub(crate) segments: Vec<&'a str>,
	pub(crate) trailing_slash: bool,
}

impl<'a> Input<'a> {
	pub(crate) fn parse(path: &'a str) -> Self {
		let path = path.strip_prefix('/').unwrap_or(path);
		if path.is_empty() {
			return Self {
				segments: Vec::new(),
				trailing_slash: false,
			};
		}

		let (path, trailing_slash) = match path.strip_suffix('/') {
			Some(path) => (path, true),
			None => (path, false),
		};

		Self {
			segments: path.split('/').collect(),
			trailing_slash,
		}
	}
}

/// Produces a value for paths no route matched.
pub type Fallback<R> = fn(path: &str) -> R;

pub struct RouterBuilder<R> {
	routes: Vec<Route<R>>,
	fallback: Option<Fallback<R>>,
	accept_trailing_slash: bool,
}

impl<R> Default for RouterBuilder<R> {
	fn default() -> Self {
		Self {
			routes: Vec::new(),
			fallback: None,
			accept_trailing_slash: true,
		}
	}
}

impl<R> RouterBuilder<R> {
	/// Adds a route after every route registered so far.
	pub fn route(mut self, route: Route<R>) -> Self {
		self.routes.push(route);
		self
	}

	pub fn routes<I>(mut self, routes: I) -> Self
	where
		I: IntoIterator<Item = Route<R>>,
	{
		self.routes.extend(routes);
		self
	}

	/// Used by [`Router::dispatch`] when nothing matches.
	pub fn fallback(mut self, fallback: Fallback<R>) -> Self {
		self.fallback = Some(fallback);
		self
	}

	/// Whether [`Router::dispatch`] accepts [`MatchResult::MatchWithTrailingSlash`]. Defaults to
	/// `true`.
	pub fn accept_trailing_slash(mut self, accept: bool) -> Self {
		self.accept_trailing_slash = accept;
		self
	}

	pub fn build(self) -> Router<R> {
		Router {
			routes: self.routes,
			fallback: self.fallback,
			accept_trailing_slash: self.accept_trailing_slash,
		}
	}
}

/// An ordered list of routes sharing one result type.
///
/// Routes are tried in the order they were added and the first one to match wins.
pub struct Router<R> {
	routes: Vec<Route<R>>,
	fallback: Option<Fallback<R>>,
	accept_trailing_slash: bool,
}

impl<R> Router<R> {
	pub fn new(routes: Vec<Route<R>>) -> Self {
		Self::builder().routes(routes).build()
	}

	pub fn builder() -> RouterBuilder<R> {
		RouterBuilder::default()
	}

	/// Matches `path` against every route in order, calling the handler of the first route that
	/// matches.
	///
	/// Routes restricted to a method are skipped unless `method` is that method.
	pub fn recognize(&self, path: &str, method: Option<&Method>) -> MatchResult<R> {
		self.scan(path, method, true)
	}

	pub fn recognize_request<B>(&self, req: &http::Request<B>) -> MatchResult<R> {
		self.recognize(req.uri().path(), Some(req.method()))
	}

	/// Like [`recognize`](Self::recognize), collapsed to a single value using the router's
	/// fallback and trailing slash settings.
	///
	/// When trailing slashes are not accepted, a route that would only match with the slash is
	/// skipped before its handler runs, and the scan moves on to the next route.
	pub fn dispatch(&self, path: &str, method: Option<&Method>) -> Option<R> {
		match self.scan(path, method, self.accept_trailing_slash) {
			MatchResult::FullMatch(value) | MatchResult::MatchWithTrailingSlash(value) => return Some(value),
			MatchResult::NoMatch => {}
		}

		let fallback = self.fallback?;
		debug!(path, "using fallback");
		Some(fallback(path))
	}

	fn scan(&self, path: &str, method: Option<&Method>, accept_with_slash: bool) -> MatchResult<R> {
		let input = Input::parse(path);

		for (index, route) in self.routes.iter().enumerate() {
			let result = route.resolve(&input, method, accept_with_slash);
			if result.is_match() {
				trace!(path, route = index, pattern = route.pattern(), "route matched");
				return result;
			}
		}

		trace!(path, "no route matched");
		MatchResult::NoMatch
	}

	/// The methods of method-restricted routes whose path matches, in route order.
	///
	/// Handlers are not called. Useful for building an `Allow` header when a path exists but
	/// not for the requested method.
	pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
		let input = Input::parse(path);
		let mut methods: Vec<Method> = Vec::new();
		for route in &self.routes {
			if let Some(method) = route.method() {
				if !methods.contains(method) && route.matches_path(&input) {
					methods.push(method.clone());
				}
			}
		}
		methods
	}

	pub fn routes(&self) -> impl Iterator<Item = &Route<R>> {
		self.routes.iter()
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}

impl<R> From<Vec<Route<R>>> for Router<R> {
	fn from(routes: Vec<Route<R>>) -> Self {
		Self::new(routes)
	}
}

impl<R> FromIterator<Route<R>> for Router<R> {
	fn from_iter<I: IntoIterator<Item = Route<R>>>(iter: I) -> Self {
		Self::builder().routes(iter).build()
	}
}

impl<R> Debug for Router<R> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.routes)
			.field("has_fallback", &self.fallback.is_some())
			.field("accept_trailing_slash", &self.accept_trailing_slash)
			.finish()
	}
}
