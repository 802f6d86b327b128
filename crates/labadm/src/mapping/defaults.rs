//! First-present selection among fallback sources.

/// A boxed fallback source, so differently-typed closures fit one list.
pub type Fallback<'a, T> = Box<dyn FnOnce() -> Option<T> + 'a>;

/// Evaluate candidates in order and return the first `Some`.
///
/// Candidates after the first hit are never called.
///
/// ```
/// use labadm::mapping::{Fallback, first_present};
///
/// let from_file: Option<String> = None;
/// let candidates: [Fallback<'_, String>; 2] = [
///     Box::new(|| from_file),
///     Box::new(|| Some("unknown".to_string())),
/// ];
/// let analyst = first_present(candidates);
/// assert_eq!(analyst.as_deref(), Some("unknown"));
/// ```
pub fn first_present<T, F>(candidates: impl IntoIterator<Item = F>) -> Option<T>
where
    F: FnOnce() -> Option<T>,
{
    candidates.into_iter().find_map(|candidate| candidate())
}

/// Apply `func` to each argument in order and return the first `Some` result.
pub fn first_not_none<A, T>(
    args: impl IntoIterator<Item = A>,
    func: impl FnMut(A) -> Option<T>,
) -> Option<T> {
    args.into_iter().find_map(func)
}
