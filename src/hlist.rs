use crate::route::Handler;

/// The empty list of captured values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HNil;

/// A captured value `H` followed by the remaining captures `T`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HCons<H, T>(pub H, pub T);

/// Appends one capture list to another.
///
/// `split` undoes `concat`, which is how a composed pattern hands each half of its arguments
/// back to the half of the pattern that owns them.
pub trait Concat<Rhs>: Sized {
	type Output;

	fn concat(self, rhs: Rhs) -> Self::Output;

	fn split(joined: Self::Output) -> (Self, Rhs);
}

impl<Rhs> Concat<Rhs> for HNil {
	type Output = Rhs;

	fn concat(self, rhs: Rhs) -> Rhs {
		rhs
	}

	fn split(joined: Rhs) -> (Self, Rhs) {
		(HNil, joined)
	}
}

impl<H, T, Rhs> Concat<Rhs> for HCons<H, T>
where
	T: Concat<Rhs>,
{
	type Output = HCons<H, T::Output>;

	fn concat(self, rhs: Rhs) -> Self::Output {
		HCons(self.0, self.1.concat(rhs))
	}

	fn split(joined: Self::Output) -> (Self, Rhs) {
		let HCons(head, rest) = joined;
		let (tail, rhs) = T::split(rest);
		(HCons(head, tail), rhs)
	}
}

/// Conversion between a capture list and the equivalent tuple.
pub trait HList: Sized {
	type Tuple;

	fn into_tuple(self) -> Self::Tuple;

	fn from_tuple(tuple: Self::Tuple) -> Self;
}

macro_rules! hlist {
	(@ty) => { HNil };
	(@ty $head:ident $(, $tail:ident)*) => { HCons<$head, hlist!(@ty $($tail),*)> };
	(@val) => { HNil };
	(@val $head:ident $(, $tail:ident)*) => { HCons($head, hlist!(@val $($tail),*)) };
}

macro_rules! impl_arity {
	($($ty:ident),*) => {
		impl<$($ty),*> HList for hlist!(@ty $($ty),*) {
			type Tuple = ($($ty,)*);

			#[allow(non_snake_case)]
			fn into_tuple(self) -> Self::Tuple {
				let hlist!(@val $($ty),*) = self;
				($($ty,)*)
			}

			#[allow(non_snake_case)]
			fn from_tuple(tuple: Self::Tuple) -> Self {
				let ($($ty,)*) = tuple;
				hlist!(@val $($ty),*)
			}
		}

		impl<Func, Out, $($ty),*> Handler<hlist!(@ty $($ty),*)> for Func
		where
			Func: Fn($($ty),*) -> Out,
		{
			type Output = Out;

			#[allow(non_snake_case)]
			fn call(&self, args: hlist!(@ty $($ty),*)) -> Out {
				let hlist!(@val $($ty),*) = args;
				(self)($($ty),*)
			}
		}
	};
}

impl_arity!();
impl_arity!(A);
impl_arity!(A, B);
impl_arity!(A, B, C);
impl_arity!(A, B, C, D);
impl_arity!(A, B, C, D, E);
impl_arity!(A, B, C, D, E, F);
impl_arity!(A, B, C, D, E, F, G);
impl_arity!(A, B, C, D, E, F, G, H);
impl_arity!(A, B, C, D, E, F, G, H, I);
impl_arity!(A, B, C, D, E, F, G, H, I, J);
impl_arity!(A, B, C, D, E, F, G, H, I, J, K);
impl_arity!(A, B, C, D, E, F, G, H, I, J, K, L);

#[cfg(test)]
mod test {
	use super::{Concat, HCons, HList, HNil};

	#[test]
	fn concat_then_split() {
		let left = HCons(1, HCons("two", HNil));
		let right = HCons(3.0, HNil);
		let joined = left.concat(right);
		assert_eq!(joined, HCons(1, HCons("two", HCons(3.0, HNil))));

		let (left, right) = <HCons<i32, HCons<&str, HNil>> as Concat<HCons<f64, HNil>>>::split(joined);
		assert_eq!(left, HCons(1, HCons("two", HNil)));
		assert_eq!(right, HCons(3.0, HNil));
	}

	#[test]
	fn concat_is_associative() {
		let a = HCons('a', HNil);
		let b = HCons(2u8, HNil);
		let c = HCons("c", HNil);
		assert_eq!(a.concat(b).concat(c), a.concat(b.concat(c)));
	}

	#[test]
	fn tuples() {
		assert_eq!(HNil.into_tuple(), ());
		assert_eq!(HCons(5, HNil).into_tuple(), (5,));
		assert_eq!(<HCons<&str, HCons<i64, HNil>>>::from_tuple(("x", 9)), HCons("x", HCons(9, HNil)));
	}
}
