// Forwards a num_traits arithmetic trait to the inherent TimePoint method of
// the same name.
macro_rules! checked_impl {
  ($trait_name:ident, $method:ident, $out:ty) => {
    impl<const HZ: u32> num_traits::$trait_name for TimePoint<HZ> {
      #[inline]
      fn $method(&self, v: &TimePoint<HZ>) -> $out {
        TimePoint::$method(*self, *v)
      }
    }
  };
}
