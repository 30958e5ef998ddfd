use std::sync::Arc;

use anyhow::{bail, Context};
use atomic_float::AtomicF64;
use log::info;
use rush_core::chart::{Chart, Lane};
use rush_core::gameplay::hit_window::HitResult;
use rush_core::gameplay::judgement::{JudgementKind, JudgementResult, Part};
use rush_core::gameplay::session::{JudgementEvent, JudgementFeed, Session};
use rush_core::input::events::InputEvent;
use rush_core::input::InputQueue;
use rush_core::time::conductor::Conductor;
use rush_schema::{Milliseconds, Replay, RulesetConfig, RushChart};

use crate::collision::ReplayPositions;

/// How long the clock keeps running after the last object ends.
const TRAILING_MS: Milliseconds = 1000.0;

#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub step_ms: Milliseconds,
    pub end_ms: Option<Milliseconds>,
    pub rewind_to_ms: Option<Milliseconds>,
}

pub fn run_simulation(
    chart: &RushChart,
    config: &RulesetConfig,
    replay: &Replay,
    options: &SimulateOptions,
) -> anyhow::Result<()> {
    if !(options.step_ms.is_finite() && options.step_ms > 0.0) {
        bail!("step must be a positive number of milliseconds (got {})", options.step_ms);
    }

    let compiled = Chart::from_schema(chart, config).context("invalid chart")?;
    let end = options.end_ms.unwrap_or_else(|| default_end(&compiled));
    let object_count = compiled.objects.len();

    let (mut session, feed) = Session::new(compiled, config);
    let positions = ReplayPositions::from_replay(replay);
    let queue = InputQueue::new();

    // The simulator stands in for the audio thread and owns the time source.
    let source = Arc::new(AtomicF64::new(0.0));
    let mut conductor = Conductor::new(source);
    let mut system_time = 0.0;
    conductor.update(system_time);

    println!(
        "Simulating {} - {} [{}] ({} objects, until {:.1} ms)",
        chart.meta.title, chart.meta.artist, chart.meta.version, object_count, end
    );

    let mut frames = replay.frames.iter().peekable();
    loop {
        let now = conductor.get_time(system_time).min(end);

        while let Some(frame) = frames.next_if(|f| f.time_ms <= now) {
            queue.push(InputEvent {
                timestamp: frame.time_ms,
                action: frame.action.into(),
                pressed: frame.pressed,
            });
        }
        session.drain_inputs(&queue, &positions);
        session.update(now, &positions);
        print_events(&feed, &session);

        if now >= end {
            break;
        }
        system_time += options.step_ms;
    }

    if let Some(target) = options.rewind_to_ms.filter(|&t| t < end) {
        println!("Rewinding to {target:.1} ms");

        conductor.seek(end, system_time);
        conductor.set_rate(-1.0);
        info!("rewinding from {end} to {target} at rate {}", conductor.rate());
        loop {
            system_time += options.step_ms;
            let now = conductor.get_time(system_time).max(target);
            session.update(now, &positions);
            print_events(&feed, &session);

            if now <= target {
                break;
            }
        }
    }

    print_summary(&session);
    Ok(())
}

fn default_end(chart: &Chart) -> Milliseconds {
    chart
        .objects
        .iter()
        .map(|o| o.end_time())
        .fold(0.0, Milliseconds::max)
        + TRAILING_MS
}

fn print_events(feed: &JudgementFeed, session: &Session) {
    let now = session.current_time();
    for event in feed.drain() {
        match event {
            JudgementEvent::Applied(r) => println!("{:9.1} + {}", r.time, describe(&r)),
            JudgementEvent::Reverted(r) => println!("{:9.1} - {}", now, describe(&r)),
            JudgementEvent::FeverActivated(p) => {
                println!("{:9.1} * fever until {:.1}", p.start, p.end)
            }
            JudgementEvent::FeverDiscarded(p) => {
                println!("{:9.1} * fever from {:.1} discarded", now, p.start)
            }
        }
    }
}

fn describe(r: &JudgementResult) -> String {
    let part = match r.key.part {
        Part::Main => "main".to_string(),
        Part::Tick(i) => format!("tick{i}"),
        Part::Lane(Lane::Air) => "air".to_string(),
        Part::Lane(Lane::Ground) => "ground".to_string(),
        Part::Head => "head".to_string(),
        Part::Tail => "tail".to_string(),
    };
    let suffix = match r.kind {
        JudgementKind::Normal => "",
        JudgementKind::Ignore => " (ignored)",
        JudgementKind::Fever => " (bonus)",
    };
    format!("#{} {} {:?}{}", r.key.object, part, r.result, suffix)
}

fn print_summary(session: &Session) {
    let tally = session.tally();
    println!("Summary at {:.1} ms", session.current_time());
    println!(
        "fever: {:.3} ({:?})",
        session.fever_progress(),
        session.fever_phase()
    );
    println!(
        "great {} good {} ok {} meh {} miss {}",
        tally.count(HitResult::Great),
        tally.count(HitResult::Good),
        tally.count(HitResult::Ok),
        tally.count(HitResult::Meh),
        tally.count(HitResult::Miss),
    );
    println!("max combo: {}", tally.max_combo());
}
