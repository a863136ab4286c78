// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface for paginating database queries

use registrar_common::api::external::DataPageParams;
use registrar_common::api::external::PaginationOrder;
use uuid::Uuid;

/// Extracts one page from `rows`, sorted by id
///
/// Every collection in the system of record paginates by id.  The sort is
/// total (ids are unique), so repeated scans with the returned markers walk
/// the collection deterministically even while presentation layers apply
/// their own display ordering.
pub fn paginated_by_id<T, F>(
    mut rows: Vec<T>,
    pagparams: &DataPageParams<'_, Uuid>,
    id_of: F,
) -> Vec<T>
where
    F: Fn(&T) -> Uuid,
{
    match pagparams.direction {
        PaginationOrder::Ascending => rows.sort_by_key(&id_of),
        PaginationOrder::Descending => {
            rows.sort_by_key(&id_of);
            rows.reverse();
        }
    }

    let limit = pagparams.limit.get() as usize;
    match pagparams.marker {
        None => rows.into_iter().take(limit).collect(),
        Some(marker) => rows
            .into_iter()
            .filter(|row| match pagparams.direction {
                PaginationOrder::Ascending => id_of(row) > *marker,
                PaginationOrder::Descending => id_of(row) < *marker,
            })
            .take(limit)
            .collect(),
    }
}
