use rand::{rngs::StdRng, Rng, SeedableRng};
use satspec::{TimePoint, SEC_MAX, SEC_MIN};

pub fn init_logging() {
  let _ = env_logger::builder().is_test(true).try_init();
}

pub fn seeded_rng() -> StdRng {
  StdRng::seed_from_u64(0x5EC0_2D5A)
}

/// Exact value of `t` in sub-second units.
pub fn units_of<const HZ: u32>(t: TimePoint<HZ>) -> i128 {
  i128::from(t.seconds()) * i128::from(HZ) + i128::from(t.subsec_units())
}

/// Random time value, biased toward the ends of the seconds range and the
/// edges of the sub-second range.
pub fn arbitrary<const HZ: u32>(rng: &mut StdRng) -> TimePoint<HZ> {
  let seconds = match rng.gen_range(0..5) {
    0 => rng.gen::<i64>(),
    1 => SEC_MIN + rng.gen_range(0..3),
    2 => SEC_MAX - rng.gen_range(0..3),
    3 => rng.gen_range(-2..3),
    _ => rng.gen_range(-1_000_000..1_000_000),
  };
  let units = match rng.gen_range(0..4) {
    0 => 0,
    1 => HZ - 1,
    _ => rng.gen_range(0..HZ),
  };
  TimePoint::new(seconds, units).unwrap()
}
