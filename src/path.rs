use crate::{
	hlist::{Concat, HCons, HList, HNil},
	route::{Handler, Route},
	segment::{self, Matcher},
	Method,
};
use std::{
	fmt::{self, Display, Formatter},
	ops::{Div, RangeInclusive},
};

/// Builds a strict [`Path`] from a slash-separated list of segments.
///
/// String literals become literal segments; anything else must evaluate to a pattern node,
/// e.g. a capture constructor call. A segment may span several tokens, so path-qualified
/// calls like `waypath::int()` work unwrapped. `path![]` is the root.
///
/// ```
/// use waypath::{int, path, string};
///
/// let user = path!["user" / string() / "posts" / int()];
/// assert_eq!(user.to_string(), "/user/:string/posts/:int");
/// assert_eq!(user.generate(("alice".to_owned(), 3)), "/user/alice/posts/3");
///
/// let page = path!["page" / waypath::int_in(1..=10)];
/// assert_eq!(page.to_string(), "/page/:int");
/// ```
#[macro_export]
macro_rules! path {
	(@munch ($($acc:tt)*) ($($segment:tt)+)) => {
		$crate::Pattern::strict($($acc)* / ($($segment)+))
	};
	(@munch ($($acc:tt)*) ($($segment:tt)+) / $($rest:tt)+) => {
		$crate::path!(@munch ($($acc)* / ($($segment)+)) () $($rest)+)
	};
	(@munch ($($acc:tt)*) ($($segment:tt)*) $next:tt $($rest:tt)*) => {
		$crate::path!(@munch ($($acc)*) ($($segment)* $next) $($rest)*)
	};
	[] => {
		$crate::Pattern::strict($crate::root())
	};
	[ $($tokens:tt)+ ] => {
		$crate::path!(@munch ($crate::root()) () $($tokens)+)
	};
}

/// The segments of an input path that have not been consumed yet.
#[derive(Debug, Clone, Copy)]
pub struct Segments<'a> {
	remaining: &'a [&'a str],
}

impl<'a> Segments<'a> {
	pub(crate) fn new(segments: &'a [&'a str]) -> Self {
		Self { remaining: segments }
	}

	/// Consumes and returns the next segment.
	pub fn next_segment(&mut self) -> Option<&'a str> {
		let (first, rest) = self.remaining.split_first()?;
		self.remaining = rest;
		Some(*first)
	}

	/// Consumes every remaining segment, joined back together with `/`.
	pub fn take_rest(&mut self) -> String {
		let rest = self.remaining.join("/");
		self.remaining = &[];
		rest
	}

	pub fn is_empty(&self) -> bool {
		self.remaining.is_empty()
	}
}

/// A sequence of segment nodes whose captures produce `Args`.
///
/// `Args` is the type-level list of captured values, read left to right. Matching, printing
/// and URL generation all walk the same node sequence.
pub trait Pattern {
	type Args;

	/// Consumes the segments this pattern covers, returning the captured values if every node
	/// accepted its segment.
	fn parse(&self, segments: &mut Segments<'_>) -> Option<Self::Args>;

	/// Pushes the placeholder text of every segment.
	fn describe(&self, out: &mut Vec<String>);

	/// Pushes the concrete text of every segment for the given values.
	fn format(&self, args: Self::Args, out: &mut Vec<String>);

	/// Closes the pattern; a trailing slash on the input degrades the match to
	/// [`MatchWithTrailingSlash`](crate::MatchResult::MatchWithTrailingSlash).
	fn strict(self) -> Path<Self>
	where
		Self: Sized,
	{
		Path::new(self, TrailingSlash::Strict)
	}

	/// Closes the pattern; the input may or may not end in a slash.
	fn allow_trailing_slash(self) -> Path<Self>
	where
		Self: Sized,
	{
		Path::new(self, TrailingSlash::Allow)
	}

	/// Closes the pattern; the input must end in a slash.
	fn require_trailing_slash(self) -> Path<Self>
	where
		Self: Sized,
	{
		Path::new(self, TrailingSlash::Require)
	}
}

/// Marks patterns that may be followed by further segments.
///
/// Everything except [`Rest`] (and sequences ending in it) can be extended with `/`.
pub trait Composable {}

/// The empty pattern. On its own it matches only the root path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nil;

pub fn root() -> Nil {
	Nil
}

impl Pattern for Nil {
	type Args = HNil;

	fn parse(&self, _segments: &mut Segments<'_>) -> Option<HNil> {
		Some(HNil)
	}

	fn describe(&self, _out: &mut Vec<String>) {}

	fn format(&self, _args: HNil, _out: &mut Vec<String>) {}
}

/// A segment that must equal the text exactly.
///
/// `lit("")` only matches an empty segment, as in `//`. As the last node of a pattern it
/// generates a path ending in `/`, which is read back as a trailing slash, so such a pattern
/// has no input it fully matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal(pub &'static str);

pub fn lit(text: &'static str) -> Literal {
	Literal(text)
}

impl Pattern for Literal {
	type Args = HNil;

	fn parse(&self, segments: &mut Segments<'_>) -> Option<HNil> {
		if segments.next_segment()? == self.0 {
			Some(HNil)
		} else {
			None
		}
	}

	fn describe(&self, out: &mut Vec<String>) {
		out.push(self.0.to_owned());
	}

	fn format(&self, _args: HNil, out: &mut Vec<String>) {
		out.push(self.0.to_owned());
	}
}

impl Pattern for &'static str {
	type Args = HNil;

	fn parse(&self, segments: &mut Segments<'_>) -> Option<HNil> {
		Literal(*self).parse(segments)
	}

	fn describe(&self, out: &mut Vec<String>) {
		Literal(*self).describe(out)
	}

	fn format(&self, args: HNil, out: &mut Vec<String>) {
		Literal(*self).format(args, out)
	}
}

/// A single segment parsed by a [`Matcher`].
#[derive(Debug, Clone)]
pub struct Capture<T> {
	matcher: Matcher<T>,
}

pub fn capture<T>(matcher: Matcher<T>) -> Capture<T> {
	Capture { matcher }
}

pub fn int() -> Capture<i32> {
	capture(segment::int_matcher())
}

pub fn int_in(range: RangeInclusive<i32>) -> Capture<i32> {
	capture(segment::int_in_matcher(range))
}

pub fn int64() -> Capture<i64> {
	capture(segment::int64_matcher())
}

pub fn boolean() -> Capture<bool> {
	capture(segment::bool_matcher())
}

pub fn string() -> Capture<String> {
	capture(segment::string_matcher())
}

impl<T> Pattern for Capture<T> {
	type Args = HCons<T, HNil>;

	fn parse(&self, segments: &mut Segments<'_>) -> Option<Self::Args> {
		let value = self.matcher.parse(segments.next_segment()?)?;
		Some(HCons(value, HNil))
	}

	fn describe(&self, out: &mut Vec<String>) {
		out.push(format!(":{}", self.matcher.name()));
	}

	fn format(&self, args: Self::Args, out: &mut Vec<String>) {
		out.push(self.matcher.print(&args.0));
	}
}

/// Consumes all remaining segments, none included, as one `/`-joined string.
///
/// This is a terminal node: nothing can be composed after it. A value ending in `/` generates
/// a path that matches with a trailing slash and comes back without it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rest;

pub fn rest() -> Rest {
	Rest
}

impl Pattern for Rest {
	type Args = HCons<String, HNil>;

	fn parse(&self, segments: &mut Segments<'_>) -> Option<Self::Args> {
		Some(HCons(segments.take_rest(), HNil))
	}

	fn describe(&self, out: &mut Vec<String>) {
		out.push("**".to_owned());
	}

	fn format(&self, args: Self::Args, out: &mut Vec<String>) {
		if !args.0.is_empty() {
			out.push(args.0);
		}
	}
}

/// Two patterns matched one after the other.
#[derive(Debug, Clone)]
pub struct Seq<A, B>(A, B);

impl<A, B> Pattern for Seq<A, B>
where
	A: Pattern,
	B: Pattern,
	A::Args: Concat<B::Args>,
{
	type Args = <A::Args as Concat<B::Args>>::Output;

	fn parse(&self, segments: &mut Segments<'_>) -> Option<Self::Args> {
		let left = self.0.parse(segments)?;
		let right = self.1.parse(segments)?;
		Some(left.concat(right))
	}

	fn describe(&self, out: &mut Vec<String>) {
		self.0.describe(out);
		self.1.describe(out);
	}

	fn format(&self, args: Self::Args, out: &mut Vec<String>) {
		let (left, right) = <A::Args as Concat<B::Args>>::split(args);
		self.0.format(left, out);
		self.1.format(right, out);
	}
}

impl Composable for Nil {}
impl Composable for Literal {}
impl Composable for &'static str {}
impl<T> Composable for Capture<T> {}
impl<A, B: Composable> Composable for Seq<A, B> {}

impl<R: Pattern> Div<R> for Nil {
	type Output = Seq<Nil, R>;

	fn div(self, rhs: R) -> Self::Output {
		Seq(self, rhs)
	}
}

impl<R: Pattern> Div<R> for Literal {
	type Output = Seq<Literal, R>;

	fn div(self, rhs: R) -> Self::Output {
		Seq(self, rhs)
	}
}

impl<T, R: Pattern> Div<R> for Capture<T> {
	type Output = Seq<Capture<T>, R>;

	fn div(self, rhs: R) -> Self::Output {
		Seq(self, rhs)
	}
}

impl<A, B: Composable, R: Pattern> Div<R> for Seq<A, B> {
	type Output = Seq<Seq<A, B>, R>;

	fn div(self, rhs: R) -> Self::Output {
		Seq(self, rhs)
	}
}

/// How a closed pattern treats one extra `/` at the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingSlash {
	/// Exact length is a full match; a trailing slash is reported separately.
	Strict,
	/// Both forms are a full match.
	Allow,
	/// Only the form with a trailing slash matches.
	Require,
}

/// Outcome of applying a [`TrailingSlash`] mode to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlashOutcome {
	Full,
	WithSlash,
	Rejected,
}

impl TrailingSlash {
	/// `at_root` is set when the input has no segments, where the lone `/` is the root itself.
	pub(crate) fn resolve(self, trailing_slash: bool, at_root: bool) -> SlashOutcome {
		match (self, trailing_slash) {
			(TrailingSlash::Strict, false) | (TrailingSlash::Allow, _) | (TrailingSlash::Require, true) => {
				SlashOutcome::Full
			}
			(TrailingSlash::Strict, true) => SlashOutcome::WithSlash,
			(TrailingSlash::Require, false) if at_root => SlashOutcome::Full,
			(TrailingSlash::Require, false) => SlashOutcome::Rejected,
		}
	}
}

/// A closed pattern, ready to be attached to a handler or printed.
#[derive(Debug, Clone)]
pub struct Path<P> {
	pattern: P,
	trailing_slash: TrailingSlash,
	method: Option<Method>,
}

/// Restricts a path so its route only matches requests made with `method`.
pub fn method<P>(method: Method, path: Path<P>) -> Path<P> {
	path.with_method(method)
}

impl<P> Path<P> {
	pub fn new(pattern: P, trailing_slash: TrailingSlash) -> Self {
		Self {
			pattern,
			trailing_slash,
			method: None,
		}
	}

	pub fn with_method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn pattern(&self) -> &P {
		&self.pattern
	}

	pub fn trailing_slash(&self) -> TrailingSlash {
		self.trailing_slash
	}

	pub fn method(&self) -> Option<&Method> {
		self.method.as_ref()
	}

	fn join(&self, parts: Vec<String>) -> String {
		let mut out = String::with_capacity(parts.iter().map(|part| part.len() + 1).sum::<usize>() + 1);
		out.push('/');
		out.push_str(&parts.join("/"));
		if self.trailing_slash == TrailingSlash::Require && !parts.is_empty() {
			out.push('/');
		}
		out
	}
}

impl<P: Pattern> Path<P> {
	/// Prints a concrete path from the captured values, given as a tuple in capture order.
	///
	/// The result is a full match for this path, as long as every value lies in its matcher's
	/// domain and a [`rest`] value does not end in `/`.
	pub fn generate(&self, args: <P::Args as HList>::Tuple) -> String
	where
		P::Args: HList,
	{
		let mut parts = Vec::new();
		self.pattern.format(P::Args::from_tuple(args), &mut parts);
		self.join(parts)
	}

	/// Attaches a handler whose parameters are this pattern's captures, in order.
	pub fn to<H>(self, handler: H) -> Route<H::Output>
	where
		P: Send + Sync + 'static,
		H: Handler<P::Args> + Send + Sync + 'static,
		H::Output: 'static,
	{
		Route::new(self, handler)
	}
}

impl<P: Pattern> Display for Path<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let mut parts = Vec::new();
		self.pattern.describe(&mut parts);
		f.write_str(&self.join(parts))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn parse_all<P: Pattern>(pattern: &P, input: &[&str]) -> Option<P::Args> {
		let mut segments = Segments::new(input);
		let args = pattern.parse(&mut segments)?;
		if segments.is_empty() {
			Some(args)
		} else {
			None
		}
	}

	#[test]
	fn prints_placeholders() {
		assert_eq!((root() / "sum" / int() / int()).strict().to_string(), "/sum/:int/:int");
		assert_eq!((root() / "user" / string() / int64()).strict().to_string(), "/user/:string/:int64");
		assert_eq!((root() / "static" / rest()).strict().to_string(), "/static/**");
		assert_eq!(root().strict().to_string(), "/");
		assert_eq!((root() / "dir").require_trailing_slash().to_string(), "/dir/");
		assert_eq!(root().require_trailing_slash().to_string(), "/");
	}

	#[test]
	fn generates_paths() {
		let user = (root() / "user" / string() / int64()).strict();
		assert_eq!(user.generate(("foobar".to_owned(), 56121111)), "/user/foobar/56121111");

		let flag = (lit("feature") / boolean()).allow_trailing_slash();
		assert_eq!(flag.generate((true,)), "/feature/true");

		let dir = (root() / "dir" / int()).require_trailing_slash();
		assert_eq!(dir.generate((4,)), "/dir/4/");

		assert_eq!(root().strict().generate(()), "/");
	}

	#[test]
	fn generates_rest() {
		let files = (root() / "static" / rest()).strict();
		assert_eq!(files.generate(("css/app.css".to_owned(),)), "/static/css/app.css");
		assert_eq!(files.generate((String::new(),)), "/static");
	}

	#[test]
	fn generation_limits() {
		let files = (root() / "static" / rest()).strict();
		assert_eq!(files.generate(("css/".to_owned(),)), "/static/css/");
		assert_eq!(parse_all(&files.pattern, &["static", "css"]).map(HList::into_tuple), Some(("css".to_owned(),)));

		let empty = (root() / "a" / "").strict();
		assert_eq!(empty.generate(()), "/a/");
		assert_eq!(empty.to_string(), "/a/");
		assert_eq!(parse_all(&empty.pattern, &["a"]), None);
	}

	#[test]
	fn path_macro_takes_qualified_calls() {
		let user = path!["user" / crate::string() / super::int64()];
		assert_eq!(user.to_string(), "/user/:string/:int64");

		let page = path![crate::path::lit("page") / crate::int_in(1..=9) / "x"];
		assert_eq!(page.to_string(), "/page/:int/x");
		assert_eq!(page.generate((4,)), "/page/4/x");

		let files = path!["static" / crate::rest()];
		assert_eq!(files.to_string(), "/static/**");
	}

	#[test]
	fn composition_is_associative() {
		let left = (lit("a") / int()) / (lit("b") / string());
		let right = lit("a") / (int() / (lit("b") / string()));
		let input = ["a", "1", "b", "x"];

		assert_eq!(parse_all(&left, &input).map(HList::into_tuple), Some((1, "x".to_owned())));
		assert_eq!(parse_all(&right, &input).map(HList::into_tuple), Some((1, "x".to_owned())));
		assert_eq!(left.strict().to_string(), right.strict().to_string());
	}

	#[test]
	fn literal_is_case_sensitive() {
		assert!(parse_all(&lit("user"), &["user"]).is_some());
		assert!(parse_all(&lit("user"), &["User"]).is_none());
	}

	#[test]
	fn rest_consumes_everything() {
		let files = root() / "static" / rest();
		assert_eq!(parse_all(&files, &["static", "a", "", "b"]).map(HList::into_tuple), Some(("a//b".to_owned(),)));
		assert_eq!(parse_all(&files, &["static"]).map(HList::into_tuple), Some((String::new(),)));
		assert!(parse_all(&files, &["public", "a"]).is_none());
	}

	#[test]
	fn trailing_slash_modes() {
		use SlashOutcome::*;

		assert_eq!(TrailingSlash::Strict.resolve(false, false), Full);
		assert_eq!(TrailingSlash::Strict.resolve(true, false), WithSlash);
		assert_eq!(TrailingSlash::Allow.resolve(false, false), Full);
		assert_eq!(TrailingSlash::Allow.resolve(true, false), Full);
		assert_eq!(TrailingSlash::Require.resolve(true, false), Full);
		assert_eq!(TrailingSlash::Require.resolve(false, false), Rejected);
		assert_eq!(TrailingSlash::Require.resolve(false, true), Full);
	}

	#[test]
	fn paths_carry_method() {
		let path = method(Method::POST, (root() / "items").strict());
		assert_eq!(path.method(), Some(&Method::POST));
		assert_eq!(path.trailing_slash(), TrailingSlash::Strict);
		assert!((root() / "items").strict().method().is_none());
	}
}
