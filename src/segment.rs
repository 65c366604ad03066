use std::{
	fmt::{self, Debug, Display, Formatter},
	ops::RangeInclusive,
	str::FromStr,
	sync::Arc,
};

type ParseFn<T> = Arc<dyn Fn(&str) -> Option<T> + Send + Sync>;
type PrintFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Parses a single path segment into a `T` and prints a `T` back into a segment.
///
/// Matchers are immutable and cheap to clone, so one matcher can be shared by any number of
/// patterns. Parsing never panics: input that does not belong to the matcher's domain simply
/// yields `None`.
pub struct Matcher<T> {
	name: &'static str,
	parse: ParseFn<T>,
	print: PrintFn<T>,
}

impl<T> Matcher<T> {
	/// Creates a matcher from a parse/print pair.
	///
	/// `print` should be a left inverse of `parse` so that generated paths match the pattern
	/// they were generated from.
	pub fn new<P, F>(name: &'static str, parse: P, print: F) -> Self
	where
		P: Fn(&str) -> Option<T> + Send + Sync + 'static,
		F: Fn(&T) -> String + Send + Sync + 'static,
	{
		Self {
			name,
			parse: Arc::new(parse),
			print: Arc::new(print),
		}
	}

	/// The diagnostic label used when printing a pattern, e.g. `int` renders as `:int`.
	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn parse(&self, segment: &str) -> Option<T> {
		(self.parse)(segment)
	}

	pub fn print(&self, value: &T) -> String {
		(self.print)(value)
	}
}

impl<T> Matcher<T>
where
	T: FromStr + Display + 'static,
{
	/// A matcher driven by the type's `FromStr` and `Display` implementations.
	pub fn from_str(name: &'static str) -> Self {
		Self::new(name, |segment| segment.parse().ok(), T::to_string)
	}
}

impl<T> Clone for Matcher<T> {
	fn clone(&self) -> Self {
		Self {
			name: self.name,
			parse: Arc::clone(&self.parse),
			print: Arc::clone(&self.print),
		}
	}
}

impl<T> Debug for Matcher<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Matcher").field("name", &self.name).finish()
	}
}

/// Matches a decimal `i32`.
pub fn int_matcher() -> Matcher<i32> {
	Matcher::from_str("int")
}

/// Matches a decimal `i32` that falls inside `range`.
pub fn int_in_matcher(range: RangeInclusive<i32>) -> Matcher<i32> {
	Matcher::new(
		"int",
		move |segment| segment.parse::<i32>().ok().filter(|value| range.contains(value)),
		i32::to_string,
	)
}

/// Matches a decimal `i64`.
pub fn int64_matcher() -> Matcher<i64> {
	Matcher::from_str("int64")
}

/// Matches `true` or `false`.
pub fn bool_matcher() -> Matcher<bool> {
	Matcher::from_str("bool")
}

/// Matches any non-empty segment verbatim.
///
/// Values containing `/` can be printed but will not parse back as a single segment.
pub fn string_matcher() -> Matcher<String> {
	Matcher::new(
		"string",
		|segment| {
			if segment.is_empty() {
				None
			} else {
				Some(segment.to_owned())
			}
		},
		String::clone,
	)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn int_round_trips() {
		let int = int_matcher();
		for value in [i32::MIN, -1, 0, 7, 45, i32::MAX].iter() {
			assert_eq!(int.parse(&int.print(value)), Some(*value));
		}
	}

	#[test]
	fn int_rejects_malformed_segments() {
		let int = int_matcher();
		assert_eq!(int.parse(""), None);
		assert_eq!(int.parse("abc"), None);
		assert_eq!(int.parse("1.5"), None);
		assert_eq!(int.parse("12abc"), None);
		assert_eq!(int.parse("2147483648"), None);
	}

	#[test]
	fn bounded_int_checks_range() {
		let page = int_in_matcher(1..=10);
		assert_eq!(page.parse("1"), Some(1));
		assert_eq!(page.parse("10"), Some(10));
		assert_eq!(page.parse("0"), None);
		assert_eq!(page.parse("11"), None);
		assert_eq!(page.print(&3), "3");
	}

	#[test]
	fn int64_round_trips() {
		let int64 = int64_matcher();
		for value in [i64::MIN, 0, 56121111, i64::MAX].iter() {
			assert_eq!(int64.parse(&int64.print(value)), Some(*value));
		}
		assert_eq!(int64.parse("9223372036854775808"), None);
	}

	#[test]
	fn bool_round_trips() {
		let flag = bool_matcher();
		assert_eq!(flag.parse(&flag.print(&true)), Some(true));
		assert_eq!(flag.parse(&flag.print(&false)), Some(false));
		assert_eq!(flag.parse("yes"), None);
	}

	#[test]
	fn string_takes_segment_verbatim() {
		let string = string_matcher();
		assert_eq!(string.parse("JohnUser"), Some("JohnUser".to_owned()));
		assert_eq!(string.parse(""), None);
		assert_eq!(string.parse(&string.print(&"foo bar".to_owned())), Some("foo bar".to_owned()));
	}

	#[test]
	fn custom_matcher() {
		let hex = Matcher::new(
			"hex",
			|segment| u32::from_str_radix(segment, 16).ok(),
			|value: &u32| format!("{:x}", value),
		);
		assert_eq!(hex.name(), "hex");
		assert_eq!(hex.parse("ff"), Some(255));
		assert_eq!(hex.print(&255), "ff");
		assert_eq!(hex.clone().parse("zz"), None);
	}
}
