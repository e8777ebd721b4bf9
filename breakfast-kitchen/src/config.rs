use tracing::warn;

// Nominal seconds for each cooking phase, before time scaling.
#[derive(Debug, Clone, Copy)]
pub struct PhaseTimings {
  // Quick actions: pouring, adding creamer, flipping or inserting one slice.
  pub short_task: f32,
  // Brewing time per cup of coffee.
  pub make_cup: f32,
  // Total egg cooking time, split evenly across both sides.
  pub cook_eggs: f32,
  pub warm_pan: f32,
  // Frying time per side of bacon.
  pub fry_bacon: f32,
  pub toast_bread: f32,
  pub pour_juice: f32,
}

impl Default for PhaseTimings {
  fn default() -> Self {
    Self {
      short_task: 0.5,
      make_cup: 1.0,
      cook_eggs: 6.0,
      warm_pan: 1.0,
      fry_bacon: 3.0,
      toast_bread: 4.0,
      pour_juice: 1.0,
    }
  }
}

#[derive(Debug, Clone)]
pub struct KitchenConfig {
  // Global multiplier applied to every nominal phase duration.
  pub time_scale: f32,
  pub number_of_eggs: u32,
  pub strips_of_bacon: u32,
  pub pieces_of_toast: u32,
  pub cups_of_coffee: u32,
  // Start juice together with the root dishes instead of after them.
  pub pour_juice_with_roots: bool,
  pub timings: PhaseTimings,
}

impl Default for KitchenConfig {
  fn default() -> Self {
    Self {
      time_scale: 1.0,
      number_of_eggs: 2,
      strips_of_bacon: 3,
      pieces_of_toast: 2,
      cups_of_coffee: 6,
      pour_juice_with_roots: false,
      timings: PhaseTimings::default(),
    }
  }
}

impl KitchenConfig {
  /// Defaults overridden by `BREAKFAST_*` environment variables.
  pub fn from_env() -> Self {
    let mut config = Self::default();
    override_from_env("BREAKFAST_TIME_SCALE", &mut config.time_scale);
    override_from_env("BREAKFAST_EGGS", &mut config.number_of_eggs);
    override_from_env("BREAKFAST_BACON", &mut config.strips_of_bacon);
    override_from_env("BREAKFAST_TOAST", &mut config.pieces_of_toast);
    override_from_env("BREAKFAST_COFFEE", &mut config.cups_of_coffee);
    override_from_env("BREAKFAST_JUICE_WITH_ROOTS", &mut config.pour_juice_with_roots);

    if config.time_scale <= 0.0 {
      warn!(time_scale = config.time_scale, "time scale must be positive, using 1.0");
      config.time_scale = 1.0;
    }

    config
  }
}

fn override_from_env<T: std::str::FromStr>(name: &str, slot: &mut T) {
  if let Ok(value) = std::env::var(name) {
    match value.parse() {
      Ok(parsed) => *slot = parsed,
      Err(_) => warn!(name, %value, "ignoring malformed override"),
    }
  }
}
