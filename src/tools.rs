/// Splits a slice into maximal runs of consecutive elements with equal keys.
pub struct Runs<'a, T, F, K>
where
    T: 'a,
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    slice: &'a [T],
    key: F,
}

impl<'a, T, F, K> Runs<'a, T, F, K>
where
    T: 'a,
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    pub fn new(slice: &'a [T], key: F) -> Self {
        Runs { slice, key }
    }
}

impl<'a, T, F, K> Iterator for Runs<'a, T, F, K>
where
    T: 'a,
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        let (first, rest) = self.slice.split_first()?;
        let key = (self.key)(first);
        let key_fn = &mut self.key;
        let len = 1 + rest.iter().take_while(|x| key_fn(*x) == key).count();
        let (run, tail) = self.slice.split_at(len);
        self.slice = tail;
        Some(run)
    }
}
