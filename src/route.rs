use crate::{
	path::{Path, Pattern, Segments, SlashOutcome},
	router::{Input, MatchResult},
	Method,
};
use std::fmt::{self, Debug, Formatter};

/// A function that can be called with a pattern's captured values.
///
/// Implemented for every `Fn(A, B, ..) -> R` whose parameters line up with the capture list
/// `Args`, up to twelve captures.
pub trait Handler<Args> {
	type Output;

	fn call(&self, args: Args) -> Self::Output;
}

trait Endpoint<R>: Send + Sync {
	/// A match that only differs by a trailing slash is a miss unless `accept_with_slash`.
	fn resolve(&self, input: &Input<'_>, accept_with_slash: bool) -> MatchResult<R>;

	/// Same walk as `resolve` without calling the handler.
	fn walks(&self, input: &Input<'_>) -> bool;
}

struct Bound<P, H> {
	path: Path<P>,
	handler: H,
}

impl<P: Pattern, H> Bound<P, H> {
	fn walk(&self, input: &Input<'_>) -> Option<(P::Args, SlashOutcome)> {
		let mut segments = Segments::new(&input.segments);
		let args = self.path.pattern().parse(&mut segments)?;
		if !segments.is_empty() {
			return None;
		}

		let outcome = self
			.path
			.trailing_slash()
			.resolve(input.trailing_slash, input.segments.is_empty());
		Some((args, outcome))
	}
}

impl<P, H> Endpoint<H::Output> for Bound<P, H>
where
	P: Pattern + Send + Sync,
	H: Handler<P::Args> + Send + Sync,
{
	fn resolve(&self, input: &Input<'_>, accept_with_slash: bool) -> MatchResult<H::Output> {
		match self.walk(input) {
			Some((args, SlashOutcome::Full)) => MatchResult::FullMatch(self.handler.call(args)),
			Some((args, SlashOutcome::WithSlash)) if accept_with_slash => {
				MatchResult::MatchWithTrailingSlash(self.handler.call(args))
			}
			Some(_) | None => MatchResult::NoMatch,
		}
	}

	fn walks(&self, input: &Input<'_>) -> bool {
		matches!(self.walk(input), Some((_, outcome)) if outcome != SlashOutcome::Rejected)
	}
}

struct Mapped<R, F> {
	inner: Box<dyn Endpoint<R>>,
	map: F,
}

impl<R, U, F> Endpoint<U> for Mapped<R, F>
where
	F: Fn(R) -> U + Send + Sync,
{
	fn resolve(&self, input: &Input<'_>, accept_with_slash: bool) -> MatchResult<U> {
		self.inner.resolve(input, accept_with_slash).map(&self.map)
	}

	fn walks(&self, input: &Input<'_>) -> bool {
		self.inner.walks(input)
	}
}

/// A closed path, an optional method filter and a handler producing `R`.
pub struct Route<R> {
	method: Option<Method>,
	pattern: String,
	endpoint: Box<dyn Endpoint<R>>,
}

impl<R> Route<R> {
	pub fn new<P, H>(path: Path<P>, handler: H) -> Self
	where
		P: Pattern + Send + Sync + 'static,
		H: Handler<P::Args, Output = R> + Send + Sync + 'static,
		R: 'static,
	{
		Self {
			method: path.method().cloned(),
			pattern: path.to_string(),
			endpoint: Box::new(Bound { path, handler }),
		}
	}

	/// The method this route is restricted to, if any.
	pub fn method(&self) -> Option<&Method> {
		self.method.as_ref()
	}

	/// The printed pattern, e.g. `/sum/:int/:int`.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Transforms the handler's result, so routes with different outputs can share a router.
	pub fn map<U, F>(self, map: F) -> Route<U>
	where
		R: 'static,
		F: Fn(R) -> U + Send + Sync + 'static,
	{
		Route {
			method: self.method,
			pattern: self.pattern,
			endpoint: Box::new(Mapped {
				inner: self.endpoint,
				map,
			}),
		}
	}

	pub(crate) fn accepts(&self, method: Option<&Method>) -> bool {
		match (&self.method, method) {
			(None, _) => true,
			(Some(expected), Some(actual)) => expected == actual,
			(Some(_), None) => false,
		}
	}

	pub(crate) fn resolve(&self, input: &Input<'_>, method: Option<&Method>, accept_with_slash: bool) -> MatchResult<R> {
		if self.accepts(method) {
			self.endpoint.resolve(input, accept_with_slash)
		} else {
			MatchResult::NoMatch
		}
	}

	/// Whether the path alone matches, ignoring the method filter. The handler is not called.
	pub(crate) fn matches_path(&self, input: &Input<'_>) -> bool {
		self.endpoint.walks(input)
	}
}

impl<R> Debug for Route<R> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("method", &self.method)
			.field("pattern", &self.pattern)
			.finish()
	}
}
