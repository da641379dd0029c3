use crate::record::Record;

/// Merge two runs that are already sorted ascending by price.
///
/// Equal prices keep the accumulator's element first, so the result is stable
/// with respect to accumulation order only, not original input order. The
/// coordinator folds each returned partition through this function in
/// ascending rank order; after every fold the accumulator covers all records
/// seen so far.
pub(crate) fn merge_by_price(accumulator: Vec<Record>, incoming: Vec<Record>) -> Vec<Record> {
    let mut merged = Vec::with_capacity(accumulator.len() + incoming.len());
    let mut left = accumulator.into_iter();
    let mut right = incoming.into_iter();
    let mut head_left = left.next();
    let mut head_right = right.next();
    loop {
        match (head_left.take(), head_right.take()) {
            (Some(a), Some(b)) => {
                if a.price_cents() <= b.price_cents() {
                    merged.push(a);
                    head_left = left.next();
                    head_right = Some(b);
                } else {
                    merged.push(b);
                    head_left = Some(a);
                    head_right = right.next();
                }
            }
            (Some(a), None) => {
                merged.push(a);
                merged.extend(left);
                break;
            }
            (None, Some(b)) => {
                merged.push(b);
                merged.extend(right);
                break;
            }
            (None, None) => {
                break;
            }
        }
    }
    merged
}
