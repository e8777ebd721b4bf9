use std::fmt;
use std::sync::Arc;

use breakfast_core::{Clock, Report, TaskError};

use crate::config::PhaseTimings;

pub const CHECK_MARK: &str = "√";

/// Identity and completion token for each dish task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dish {
  Coffee,
  Eggs,
  Bacon,
  Toast,
  Juice,
}

impl Dish {
  pub fn ready_message(&self) -> String {
    match self {
      Dish::Coffee => format!("{CHECK_MARK} coffee is ready"),
      Dish::Eggs => format!("{CHECK_MARK} eggs are ready"),
      Dish::Bacon => format!("{CHECK_MARK} bacon is ready"),
      Dish::Toast => format!("{CHECK_MARK} toast is ready"),
      Dish::Juice => format!("{CHECK_MARK} juice is ready"),
    }
  }
}

impl fmt::Display for Dish {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Dish::Coffee => "coffee",
      Dish::Eggs => "eggs",
      Dish::Bacon => "bacon",
      Dish::Toast => "toast",
      Dish::Juice => "juice",
    };
    write!(f, "{name}")
  }
}

pub async fn make_coffee(
  report: Arc<Report>,
  clock: Arc<Clock>,
  timings: PhaseTimings,
  cups: u32,
) -> Result<Dish, TaskError> {
  report.log(format!("making {cups} cups of coffee ...")).await;
  clock.delay(timings.make_cup * cups as f32).await?;
  report.log(format!("pot of {cups} cups coffee is done")).await;

  pour_coffee(&report, &clock, timings).await
}

async fn pour_coffee(
  report: &Report,
  clock: &Clock,
  timings: PhaseTimings,
) -> Result<Dish, TaskError> {
  report.log("Pouring coffee ...").await;
  clock.delay(timings.short_task).await?;

  add_creamer(report, clock, timings).await
}

async fn add_creamer(
  report: &Report,
  clock: &Clock,
  timings: PhaseTimings,
) -> Result<Dish, TaskError> {
  report.log("adding creamer to coffee ...").await;
  clock.delay(timings.short_task).await?;

  Ok(Dish::Coffee)
}

pub async fn fry_eggs(
  report: Arc<Report>,
  clock: Arc<Clock>,
  timings: PhaseTimings,
  how_many: u32,
) -> Result<Dish, TaskError> {
  report.log("warming the egg pan ...").await;
  clock.delay(timings.warm_pan).await?;
  report.log(format!("cracking {how_many} eggs")).await;
  report.log("cooking the eggs ...").await;
  clock.delay(timings.cook_eggs / 2.0).await?;
  report.log("flipping the eggs ...").await;
  clock.delay(timings.cook_eggs / 2.0).await?;
  report.log("put eggs on plate").await;

  Ok(Dish::Eggs)
}

pub async fn fry_bacon(
  report: Arc<Report>,
  clock: Arc<Clock>,
  timings: PhaseTimings,
  slices: u32,
) -> Result<Dish, TaskError> {
  report.log(format!("putting {slices} slices of bacon in the pan")).await;
  report.log("cooking first side of bacon ...").await;
  clock.delay(timings.fry_bacon).await?;

  // Flip every slice before any other task's narration resumes. Sibling
  // output is queued for the duration, not reordered.
  report.block().await;
  let flipped = flip_bacon(&report, &clock, timings, slices).await;
  report.unblock().await;
  flipped?;

  report.log("cooking the second side of bacon ...").await;
  clock.delay(timings.fry_bacon).await?;
  report.log("put bacon on plate").await;

  Ok(Dish::Bacon)
}

async fn flip_bacon(
  report: &Report,
  clock: &Clock,
  timings: PhaseTimings,
  slices: u32,
) -> Result<(), TaskError> {
  for slice in 1..=slices {
    report.log_force(format!("flipping slice of bacon {slice}")).await;
    clock.delay(timings.short_task).await?;
  }

  Ok(())
}

pub async fn make_toast(
  report: Arc<Report>,
  clock: Arc<Clock>,
  timings: PhaseTimings,
  slices: u32,
) -> Result<Dish, TaskError> {
  let toast = toast_bread(&report, &clock, timings, slices).await?;
  report.log("Putting butter on the toast").await;
  report.log("Putting honey on the toast").await;

  Ok(toast)
}

async fn toast_bread(
  report: &Report,
  clock: &Clock,
  timings: PhaseTimings,
  slices: u32,
) -> Result<Dish, TaskError> {
  report.block().await;
  let loaded = load_toaster(report, clock, timings, slices).await;
  report.log_force("Start toasting ...").await;
  report.unblock().await;
  loaded?;

  clock.delay(timings.toast_bread).await?;
  report.log("Remove toast from toaster").await;

  Ok(Dish::Toast)
}

async fn load_toaster(
  report: &Report,
  clock: &Clock,
  timings: PhaseTimings,
  slices: u32,
) -> Result<(), TaskError> {
  for slice in 1..=slices {
    report.log_force(format!("inserting slice of bread {slice} in the toaster")).await;
    clock.delay(timings.short_task).await?;
  }

  Ok(())
}

pub async fn pour_juice(
  report: Arc<Report>,
  clock: Arc<Clock>,
  timings: PhaseTimings,
) -> Result<Dish, TaskError> {
  report.log("pouring fresh juice ...").await;
  clock.delay(timings.pour_juice).await?;

  Ok(Dish::Juice)
}

#[cfg(test)]
mod tests {
  use super::*;
  use breakfast_core::MemoryWriter;

  fn kitchen(time_scale: f32) -> (Arc<Report>, Arc<Clock>, MemoryWriter) {
    let clock = Arc::new(Clock::new(time_scale));
    let writer = MemoryWriter::new();
    let report = Arc::new(Report::new(clock.clone(), Box::new(writer.clone())));
    (report, clock, writer)
  }

  #[tokio::test]
  async fn test_make_coffee_narrates_each_phase_in_order() {
    let (report, clock, writer) = kitchen(0.001);

    let dish = make_coffee(report, clock, PhaseTimings::default(), 6)
      .await
      .expect("coffee failed");
    assert_eq!(dish, Dish::Coffee);

    let messages: Vec<String> = writer
      .entries()
      .into_iter()
      .map(|entry| entry.message)
      .collect();
    assert_eq!(
      messages,
      vec![
        "making 6 cups of coffee ...",
        "pot of 6 cups coffee is done",
        "Pouring coffee ...",
        "adding creamer to coffee ...",
      ]
    );
  }

  #[tokio::test]
  async fn test_blocked_section_unblocks_when_a_phase_fails() {
    let (report, clock, _writer) = kitchen(1.0);
    clock.interrupt();

    let result = make_toast(report.clone(), clock, PhaseTimings::default(), 2).await;
    assert_eq!(result, Err(TaskError::DelayInterrupted));
    assert!(!report.is_blocked().await);
  }

  #[tokio::test]
  async fn test_fry_bacon_flips_every_slice() {
    let (report, clock, writer) = kitchen(0.001);

    fry_bacon(report, clock, PhaseTimings::default(), 3)
      .await
      .expect("bacon failed");

    let messages: Vec<String> = writer
      .entries()
      .into_iter()
      .map(|entry| entry.message)
      .collect();
    for slice in 1..=3 {
      assert!(messages.contains(&format!("flipping slice of bacon {slice}")));
    }
    assert_eq!(messages.last().map(String::as_str), Some("put bacon on plate"));
  }
}
