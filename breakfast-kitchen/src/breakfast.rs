use std::sync::Arc;

use breakfast_core::{
  Clock, Completion, CoordinatorError, Outcome, Report, ReportWriter, TaskError, TaskSet,
};
use thiserror::Error;
use tracing::{error, info};

use crate::config::KitchenConfig;
use crate::dishes::{self, Dish, CHECK_MARK};

#[derive(Debug, Error)]
pub enum BreakfastError {
  #[error(transparent)]
  Task(#[from] TaskError),
  #[error(transparent)]
  Coordinator(#[from] CoordinatorError),
}

/// Run the whole breakfast: preamble, the concurrent root dishes drained
/// in completion order, juice after the roots, then the final line.
///
/// Roots are spawned eagerly so they progress while the driver waits on
/// the next completion. Juice starts only once every root has been
/// reported, unless the config opts into running it with the roots.
pub async fn serve_breakfast(
  config: &KitchenConfig,
  writer: Box<dyn ReportWriter>,
) -> Result<(), BreakfastError> {
  let clock = Arc::new(Clock::new(config.time_scale));
  let report = Arc::new(Report::new(clock.clone(), writer));
  let timings = config.timings;

  report
    .log(format!(
      "Making Breakfast of {} eggs, {} strips of bacon, {} pieces of toast",
      config.number_of_eggs, config.strips_of_bacon, config.pieces_of_toast
    ))
    .await;
  report
    .log(format!("and a {} cup pot of coffee to boot", config.cups_of_coffee))
    .await;
  clock.delay(0.5).await?;
  report.log("☺ wake & bake ...").await;
  clock.delay(1.0).await?;

  let mut in_flight = TaskSet::new();
  in_flight.spawn(
    Dish::Coffee,
    dishes::make_coffee(report.clone(), clock.clone(), timings, config.cups_of_coffee),
  );
  in_flight.spawn(
    Dish::Eggs,
    dishes::fry_eggs(report.clone(), clock.clone(), timings, config.number_of_eggs),
  );
  in_flight.spawn(
    Dish::Bacon,
    dishes::fry_bacon(report.clone(), clock.clone(), timings, config.strips_of_bacon),
  );
  in_flight.spawn(
    Dish::Toast,
    dishes::make_toast(report.clone(), clock.clone(), timings, config.pieces_of_toast),
  );
  if config.pour_juice_with_roots {
    in_flight.spawn(
      Dish::Juice,
      dishes::pour_juice(report.clone(), clock.clone(), timings),
    );
  }

  while !in_flight.is_empty() {
    let completion = in_flight.next_completion().await?;
    report_completion(&report, completion).await;
  }

  if !config.pour_juice_with_roots {
    let outcome = match dishes::pour_juice(report.clone(), clock.clone(), timings).await {
      Ok(dish) => Outcome::Finished(dish),
      Err(cause) => Outcome::Failed(cause),
    };
    report_completion(&report, Completion { id: Dish::Juice, outcome }).await;
  }

  report.log(format!("{CHECK_MARK} ☺ Breakfast is ready! ☺")).await;

  Ok(())
}

async fn report_completion(report: &Report, completion: Completion<Dish, Dish>) {
  match completion.outcome {
    Outcome::Finished(dish) => {
      info!(%dish, "dish completed");
      report.log(dish.ready_message()).await;
    }
    Outcome::Failed(cause) => {
      error!(dish = %completion.id, %cause, "dish failed");
      report
        .log(format!("✗ {} failed: {}", completion.id, cause))
        .await;
    }
  }
}
