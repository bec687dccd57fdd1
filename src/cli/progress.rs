use std::fmt::Display;
use std::time::Duration;

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::plan::{Plan, TaskKey};
use crate::Result;

#[derive(PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Pending,
    InProgress,
    Skipped,
    Failed,
}

pub struct StepContext {
    step_num: usize,
    steps: Vec<Step>,
}

pub struct Step {
    desc: String,
    key: TaskKey,
    progress_bar: ProgressBar,
}

impl Step {
    fn new(desc: impl Into<String>, key: TaskKey) -> Self {
        Self {
            desc: desc.into(),
            key,
            progress_bar: ProgressBar::new_spinner(),
        }
    }
}

impl StepContext {
    pub fn new(plan: &Plan) -> Self {
        println!("Steps:");

        let mut steps = Vec::with_capacity(plan.steps.len() + 2);
        steps.push(Step::new("Read tiles", TaskKey::ReadTiles));
        for (i, step) in plan.steps.iter().enumerate() {
            steps.push(Step::new(step.desc(), TaskKey::Transform(i)));
        }
        steps.push(Step::new("Write tiles", TaskKey::WriteTiles));

        let mp = MultiProgress::new();
        let num_steps = steps.len();
        let width = format!("{num_steps}").len();
        for (i, step) in steps.iter_mut().enumerate() {
            mp.insert(i, step.progress_bar.clone());
            let msg = Some(format!(
                "[{:width$}/{:width$}] {}",
                i + 1,
                num_steps,
                step.desc
            ));
            step.set_status(StepStatus::Pending, msg);
        }
        if let Some(first) = steps.first_mut() {
            first.set_status(StepStatus::InProgress, None);
        }
        StepContext { step_num: 0, steps }
    }

    #[inline]
    pub fn current_step(&mut self) -> Option<&mut Step> {
        self.steps.get_mut(self.step_num)
    }

    pub fn check<T>(&mut self, res: Result<T>) -> Result<T> {
        if res.is_err() {
            if let Some(current_step) = self.current_step() {
                current_step.set_status(StepStatus::Failed, None);
                self.step_num += 1;
                while let Some(current_step) = self.current_step() {
                    current_step.set_status(StepStatus::Skipped, None);
                    self.step_num += 1;
                }
            }
            println!("\n");
        }

        res
    }

    pub fn finish(&mut self, key: TaskKey) {
        if let Some(current_step) = self.current_step() {
            if current_step.key != key {
                panic!("A step was completed out of order");
            }

            current_step.set_status(StepStatus::Done, None);

            self.step_num += 1;

            if let Some(current_step) = self.current_step() {
                current_step.set_status(StepStatus::InProgress, None);
            } else {
                self.done();
            }
        } else {
            panic!("A step was completed after all steps were marked completed");
        }
    }

    pub fn done(&mut self) {
        println!("\n\nCompleted all steps");
    }
}

fn format_template(spinner: bool, status: impl Display) -> String {
    if spinner {
        format!("{{spinner:.green}} {:16} {{msg}}", status)
    } else {
        format!("  {:16} {{msg}}", status)
    }
}

impl Step {
    fn set_status(&mut self, status: StepStatus, msg: Option<String>) {
        let status_template = match status {
            StepStatus::Done => format_template(false, "Done".green().bold()),
            StepStatus::Failed => format_template(false, "Failed".bright_white().on_red().bold()),
            StepStatus::InProgress => format_template(true, "In Progress".bright_white().bold()),
            StepStatus::Pending => format_template(true, "Pending".blue().bold()),
            StepStatus::Skipped => format_template(false, "Skipped".yellow().bold()),
        };
        if let Ok(style) = ProgressStyle::with_template(&status_template) {
            self.progress_bar.set_style(style);
        }

        if let Some(msg) = msg {
            self.progress_bar.set_message(msg);
        }

        if status == StepStatus::InProgress {
            self.progress_bar
                .enable_steady_tick(Duration::from_millis(200));
        } else if status != StepStatus::Pending {
            self.progress_bar.finish();
        }
    }
}
