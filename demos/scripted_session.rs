//! Replays a scripted workout through the frame pipeline and prints the counts.
//!
//! Run with `RUST_LOG=rep_counter=debug` to see per-frame detector events.
//! An optional first argument names a settings file to load.

use rep_counter::{
    pose_channel, BodyPart, Config, FramePipeline, HostCapture, Pose, PoseBuilder, RepCounts,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SCORE: f32 = 0.92;

/// Side-on squatter: both knees at `knee_deg`
fn squat_frame(knee_deg: f32) -> Pose {
    let theta = knee_deg.to_radians();
    let mut builder = PoseBuilder::new().score(SCORE);
    for (cx, hip, knee, ankle) in [
        (280.0, BodyPart::LeftHip, BodyPart::LeftKnee, BodyPart::LeftAnkle),
        (360.0, BodyPart::RightHip, BodyPart::RightKnee, BodyPart::RightAnkle),
    ] {
        builder = builder
            .joint(hip, cx, 300.0, SCORE)
            .joint(knee, cx, 400.0, SCORE)
            .joint(ankle, cx + 100.0 * theta.sin(), 400.0 - 100.0 * theta.cos(), SCORE);
    }
    builder.build()
}

/// Front-facing jumper: arms up and feet apart, or arms down and feet together
fn jack_frame(open: bool) -> Pose {
    let (wrist_y, half_stance) = if open { (40.0, 75.0) } else { (330.0, 12.0) };
    PoseBuilder::new()
        .score(SCORE)
        .joint(BodyPart::LeftShoulder, 280.0, 150.0, SCORE)
        .joint(BodyPart::RightShoulder, 360.0, 150.0, SCORE)
        .joint(BodyPart::LeftWrist, 250.0, wrist_y, SCORE)
        .joint(BodyPart::RightWrist, 390.0, wrist_y, SCORE)
        .joint(BodyPart::LeftAnkle, 320.0 - half_stance, 520.0, SCORE)
        .joint(BodyPart::RightAnkle, 320.0 + half_stance, 520.0, SCORE)
        .build()
}

fn workout() -> Vec<Pose> {
    let mut frames = Vec::new();
    for _ in 0..3 {
        for knee in [170.0, 140.0, 110.0, 80.0, 70.0, 95.0, 130.0, 165.0] {
            frames.push(squat_frame(knee));
        }
    }
    for _ in 0..5 {
        frames.push(jack_frame(false));
        frames.push(jack_frame(true));
        frames.push(jack_frame(true));
    }
    frames.push(jack_frame(false));
    frames
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&PathBuf::from(path))?,
        None => Config::default(),
    };

    let pipeline = FramePipeline::new(config)?;
    let mut reports = pipeline.subscribe();
    let (feeder, source) = pose_channel(32);
    let handle = pipeline
        .start(Box::new(HostCapture::granted()), source)
        .await?;

    let printer = tokio::spawn(async move {
        let mut last_counts = RepCounts::default();
        while let Ok(report) = reports.recv().await {
            if report.counts != last_counts {
                println!(
                    "frame {:>3}: squats {} | jumping jacks {} | bones drawn {}",
                    report.frame_index,
                    report.counts.squat,
                    report.counts.jumping_jack,
                    report.skeleton.len()
                );
                last_counts = report.counts;
            }
        }
    });

    for pose in workout() {
        feeder.submit(pose).await;
        tokio::time::sleep(std::time::Duration::from_millis(33)).await;
    }
    drop(feeder);

    while !handle.is_finished() {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    let summary = handle.stop().await?;
    printer.await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
