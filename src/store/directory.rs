/// Insertion-ordered map from metadata key to bucket.
///
/// Lookup is a linear scan: bucket counts stay small next to primitive counts.
/// Each meta appears at most once, and a bucket's position never changes once assigned.
#[derive(Debug, Clone)]
pub(crate) struct BucketDirectory<B> {
    buckets: Vec<(i64, B)>,
}

impl<B> Default for BucketDirectory<B> {
    fn default() -> Self { Self { buckets: Vec::new() } }
}

impl<B> BucketDirectory<B> {
    #[inline] pub(crate) fn len(&self) -> usize { self.buckets.len() }

    #[inline] pub(crate) fn is_empty(&self) -> bool { self.buckets.is_empty() }

    /// First-seen position of `meta`, if present.
    pub(crate) fn position(&self, meta: i64) -> Option<usize> {
        self.buckets.iter().position(|(key, _)| *key == meta)
    }

    pub(crate) fn get(&self, meta: i64) -> Option<&B> {
        self.position(meta).map(|idx| &self.buckets[idx].1)
    }

    /// Return the bucket for `meta`, appending a new one built by `create` if absent.
    pub(crate) fn get_or_insert_with(&mut self, meta: i64, create: impl FnOnce() -> B) -> &mut B {
        let idx = match self.position(meta) {
            Some(idx) => idx,
            None => {
                log::debug!("[store] new bucket #{} for meta {}", self.buckets.len(), meta);
                self.buckets.push((meta, create()));
                self.buckets.len() - 1
            }
        };
        &mut self.buckets[idx].1
    }

    /// Iterator over (meta, bucket) in first-seen order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (i64, &B)> + '_ {
        self.buckets.iter().map(|(meta, bucket)| (*meta, bucket))
    }
}

#[cfg(test)]
mod tests {
    use super::BucketDirectory;

    #[test]
    fn first_seen_order_is_stable() {
        let mut dir: BucketDirectory<Vec<u32>> = BucketDirectory::default();
        dir.get_or_insert_with(30, Vec::new).push(1);
        dir.get_or_insert_with(-5, Vec::new).push(2);
        dir.get_or_insert_with(30, Vec::new).push(3);
        dir.get_or_insert_with(12, Vec::new).push(4);

        assert_eq!(dir.len(), 3);
        assert_eq!(dir.position(30), Some(0));
        assert_eq!(dir.position(-5), Some(1));
        assert_eq!(dir.position(12), Some(2));
        assert_eq!(dir.get(30), Some(&vec![1, 3]));
        let metas: Vec<i64> = dir.iter().map(|(meta, _)| meta).collect();
        assert_eq!(metas, vec![30, -5, 12]);
    }

    #[test]
    fn create_runs_once_per_meta() {
        let mut dir: BucketDirectory<u32> = BucketDirectory::default();
        let mut calls = 0;
        for _ in 0..3 {
            dir.get_or_insert_with(1, || { calls += 1; 0 });
        }
        assert_eq!(calls, 1);
        assert!(dir.get(2).is_none());
        assert!(!dir.is_empty());
    }
}
