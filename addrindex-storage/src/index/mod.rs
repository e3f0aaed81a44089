//! Typed index stores.
//!
//! Each store pairs one codec with one backend database and exposes the
//! writes the scanning workers need and the paginated reads the API
//! layer serves. The stores use unprefixed keys, so each one must own
//! its backend database exclusively.

mod address_store;
mod batch_store;
mod block_store;

pub use address_store::AddressIndexStore;
pub use batch_store::BatchStatusStore;
pub use block_store::BlockIndexStore;

/// Apply `(rows, start)` pagination while walking an iterator: counts
/// every item, keeps only the requested page, and hands page members to
/// `decode`.
///
/// The total is the full match count, not the page size, so callers can
/// report it alongside the page.
pub(crate) fn paginate<I, T, E>(
    items: I,
    rows: usize,
    start: usize,
    mut decode: impl FnMut(I::Item) -> Result<T, E>,
) -> Result<(usize, Vec<T>), E>
where
    I: Iterator,
{
    let mut total = 0usize;
    let mut page = Vec::with_capacity(rows.min(64));
    for item in items {
        if total >= start && page.len() < rows {
            page.push(decode(item)?);
        }
        total += 1;
    }
    Ok((total, page))
}
