use crate::record::Record;

/// Sort a partition in place, ascending by price.
///
/// Lomuto partition scheme with the last element of the range as the pivot.
/// The pivot is fixed, so already sorted descending input degrades to O(n^2);
/// a known performance edge, acceptable for batch runs. The sort is not
/// stable - records with equal prices keep no particular relative order.
pub(crate) fn sort_by_price(records: &mut [Record]) {
    if records.len() > 1 {
        quicksort(records, 0, records.len() - 1);
    }
}

fn quicksort(records: &mut [Record], low: usize, high: usize) {
    if low < high {
        let pivot = partition(records, low, high);
        if pivot > low {
            quicksort(records, low, pivot - 1);
        }
        quicksort(records, pivot + 1, high);
    }
}

fn partition(records: &mut [Record], low: usize, high: usize) -> usize {
    let pivot = records[high].price_cents();
    let mut boundary = low;
    for current in low..high {
        if records[current].price_cents() < pivot {
            records.swap(boundary, current);
            boundary += 1;
        }
    }
    records.swap(boundary, high);
    boundary
}
