/// Builds a [`VisitableTuple`] from a list of expressions.
///
/// The structured value of the result is the plain tuple of the expressions,
/// in order, so up to 16 elements are supported. Use [`visitable_list!`] for
/// more.
///
/// [`VisitableTuple`]: crate::VisitableTuple
/// [`visitable_list!`]: crate::visitable_list
///
/// # Examples
///
/// ```
/// use visitable::{VisitableTuple, Visitor, visitable_tuple};
///
/// #[derive(Default)]
/// struct Sizes(Vec<usize>);
///
/// impl<E> Visitor<E> for Sizes {
///     fn visit(&mut self, _element: &E) {
///         self.0.push(core::mem::size_of::<E>());
///     }
/// }
///
/// let tuple: VisitableTuple<(u8, u32, [u16; 3]), Sizes> = visitable_tuple![1, 2, [3, 4, 5]];
///
/// let mut sizes = Sizes::default();
/// tuple.accept_all(&mut sizes);
/// assert_eq!(sizes.0, [1, 4, 6]);
///
/// let empty: VisitableTuple<(), Sizes> = visitable_tuple![];
/// assert_eq!(empty.values_count(), 0);
/// ```
#[macro_export]
macro_rules! visitable_tuple {
    () => {
        $crate::VisitableTuple::new(())
    };
    ($($element:expr),+ $(,)?) => {
        $crate::VisitableTuple::new(($($element,)+))
    };
}

/// Builds a [`VisitableTuple`] from a list of expressions of any length.
///
/// This is equivalent to calling [`VisitableTupleBuilder::push`] once per
/// expression, in order, followed by [`VisitableTupleBuilder::build`]. The
/// structured value of the result is a [`Snoc`] list.
///
/// [`VisitableTuple`]: crate::VisitableTuple
/// [`VisitableTupleBuilder::push`]: crate::VisitableTupleBuilder::push
/// [`VisitableTupleBuilder::build`]: crate::VisitableTupleBuilder::build
/// [`Snoc`]: crate::list::Snoc
///
/// # Examples
///
/// ```
/// use visitable::{VisitableTuple, Visitor, visitable_list};
///
/// struct Sum(u64);
///
/// impl Visitor<u64> for Sum {
///     fn visit(&mut self, element: &u64) {
///         self.0 += element;
///     }
/// }
///
/// let tuple: VisitableTuple<_, Sum> = visitable_list![
///     1_u64, 2_u64, 3_u64, 4_u64, 5_u64, 6_u64, 7_u64, 8_u64, 9_u64, 10_u64,
///     11_u64, 12_u64, 13_u64, 14_u64, 15_u64, 16_u64, 17_u64, 18_u64, 19_u64, 20_u64,
/// ];
/// assert_eq!(tuple.values_count(), 20);
///
/// let mut sum = Sum(0);
/// tuple.accept_all(&mut sum);
/// assert_eq!(sum.0, 210);
/// ```
#[macro_export]
macro_rules! visitable_list {
    ($($element:expr),* $(,)?) => {
        $crate::VisitableTupleBuilder::new()
            $(.push($element))*
            .build()
    };
}
