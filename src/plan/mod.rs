use crate::cli::progress::StepContext;
use crate::config::{PipelineConfig, Step};
use crate::error::TileError;
use crate::io::{read_tiles, write_tiles, WriteFormat};
use crate::paths::default_output;
use crate::tile::{Rules, TileSet};
use crate::transform::{
    move_tiles, rotate_tiles, space_horizontal, space_vertical, Direction, HorizontalSpacing,
    VerticalSpacing,
};
use crate::Result;
use anyhow::{anyhow, bail};
use std::path::PathBuf;

/// A validated, ready-to-run transform pipeline.
pub struct Plan {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: WriteFormat,
    pub rules: Rules,
    pub steps: Vec<Step>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TaskKey {
    ReadTiles,
    /// Index into [`Plan::steps`].
    Transform(usize),
    WriteTiles,
}

pub struct ExecutePlanParams<'a> {
    pub plan: &'a Plan,
    pub ctx: Option<&'a mut StepContext>,
}

pub fn generate_plan(config: &PipelineConfig) -> Result<Plan> {
    let input = config
        .input
        .clone()
        .ok_or_else(|| anyhow!("No input placement file given"))?;
    let output = config
        .output
        .clone()
        .unwrap_or_else(|| default_output(&input));

    if input == output {
        bail!("Output file must differ from the input file ({:?})", input);
    }

    for (i, step) in config.steps.iter().enumerate() {
        if step.numbers().iter().any(|x| !x.is_finite()) {
            bail!("Step {} ({}) has a non-finite parameter", i + 1, step.desc());
        }
        if let Step::SpaceVertical { pdn_pitch, .. } = *step {
            if pdn_pitch <= 0.0 {
                return Err(TileError::Validation(format!(
                    "step {}: PDN pitch must be positive, got {pdn_pitch}",
                    i + 1
                ))
                .into());
            }
        }
    }

    if !config.rules.rotation_shift_x.is_finite() {
        bail!("Rotation shift must be finite");
    }
    if config.rules.memory_row_units == 0 {
        bail!("Memory macros must span at least one row");
    }

    Ok(Plan {
        input,
        output,
        format: config.format,
        rules: config.rules.clone(),
        steps: config.steps.clone(),
    })
}

macro_rules! try_finish_task {
    ( $ctx:expr, $task:expr ) => {
        if let Some(ctx) = $ctx.as_mut() {
            ctx.finish($task);
        }
    };
}

/// Applies a single step to `tiles`.
pub fn apply_step(tiles: &mut TileSet, rules: &Rules, step: &Step) -> crate::error::Result<()> {
    match step {
        Step::Rotate { origin, angle } => {
            rotate_tiles(tiles, rules, (*origin).into(), *angle);
        }
        Step::Translate { x_offset, y_offset } => {
            move_tiles(tiles, rules, *x_offset, *y_offset);
        }
        Step::SpaceVertical {
            space,
            pdn_pitch,
            start_bot,
        } => {
            let params = VerticalSpacing {
                space: *space,
                pdn_pitch: *pdn_pitch,
                direction: Direction::from_ascending(*start_bot),
            };
            space_vertical(tiles, rules, &params)?;
        }
        Step::SpaceHorizontal {
            space,
            start_left,
            window,
        } => {
            let params = HorizontalSpacing {
                space: *space,
                direction: Direction::from_ascending(*start_left),
                window: *window,
            };
            space_horizontal(tiles, rules, &params)?;
        }
    }
    Ok(())
}

/// Reads, transforms and writes tiles as described by `params.plan`.
///
/// Nothing is written if reading or any step fails.
pub fn execute_plan(params: ExecutePlanParams) -> Result<TileSet> {
    let ExecutePlanParams { plan, mut ctx } = params;

    let mut tiles = read_tiles(&plan.input)?;
    log::info!("read {} tiles from {:?}", tiles.len(), &plan.input);
    try_finish_task!(ctx, TaskKey::ReadTiles);

    for (i, step) in plan.steps.iter().enumerate() {
        log::info!("step {}: {}", i + 1, step.desc());
        apply_step(&mut tiles, &plan.rules, step)?;
        try_finish_task!(ctx, TaskKey::Transform(i));
    }

    log::debug!("final placement:\n{tiles}");

    write_tiles(&tiles, &plan.output, plan.format)?;
    log::info!("wrote {} tiles to {:?}", tiles.len(), &plan.output);
    try_finish_task!(ctx, TaskKey::WriteTiles);

    Ok(tiles)
}

/// Runs `config` end to end without progress reporting.
pub fn run_pipeline(config: &PipelineConfig) -> Result<TileSet> {
    let plan = generate_plan(config)?;
    execute_plan(ExecutePlanParams {
        plan: &plan,
        ctx: None,
    })
}

pub fn step_count(plan: &Plan) -> usize {
    plan.steps.len() + 2
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use std::path::Path;

    use super::*;
    use crate::io::parse_str;
    use crate::tile::Orientation;
    use crate::transform::Window;

    const MACRO_CFG: &str = "\
Tile_X0Y0_N_term_single 0 400 N
Tile_X1Y0_N_term_single 100 400 N
Tile_X0Y1_LUT4AB 0 200 FS
Tile_X1Y1_LUT4AB 100 200 FS
Tile_X0Y2_S_term_single 0 0 N
Tile_X1Y2_S_term_single 100 0 N
  placement annotation
cvxif_pau 5000 5000 FN
";

    fn config(dir: &Path, steps: Vec<Step>, format: WriteFormat) -> PipelineConfig {
        let input = dir.join("macro_tmp.cfg");
        std::fs::write(&input, MACRO_CFG).unwrap();
        PipelineConfig {
            input: Some(input),
            output: Some(dir.join("build/macro_manipulated.cfg")),
            format,
            rules: Rules::default().with_ignore(["cvxif_pau"]),
            steps,
        }
    }

    #[test]
    fn test_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(
            dir.path(),
            vec![
                Step::SpaceHorizontal {
                    space: 5.0,
                    start_left: true,
                    window: None,
                },
                Step::SpaceVertical {
                    space: 10.0,
                    pdn_pitch: 75.0,
                    start_bot: true,
                },
                Step::Translate {
                    x_offset: -113.0,
                    y_offset: 0.0,
                },
            ],
            WriteFormat::Precision,
        );

        let tiles = run_pipeline(&config).unwrap();
        let written =
            parse_str(&std::fs::read_to_string(config.output.as_ref().unwrap()).unwrap()).unwrap();
        assert_eq!(tiles, written);

        let pos = |name: &str| {
            let tile = written.get(name).unwrap();
            (tile.x, tile.y)
        };
        assert_eq!(pos("Tile_X0Y2_S_term_single"), (-113.0, 0.0));
        assert_eq!(pos("Tile_X1Y1_LUT4AB"), (-8.0, 210.0));
        assert_eq!(pos("Tile_X1Y0_N_term_single"), (-8.0, 475.0));
        assert_eq!(pos("cvxif_pau"), (5000.0, 5000.0));
        assert_eq!(written.get("Tile_X0Y1_LUT4AB").unwrap().orientation, Orientation::FS);
    }

    #[test]
    fn test_step_order_matters() {
        let dir = tempfile::tempdir().unwrap();
        let rotate = Step::Rotate {
            origin: (0.0, 0.0),
            angle: 90.0,
        };
        let space = Step::SpaceHorizontal {
            space: 5.0,
            start_left: true,
            window: None,
        };

        let a = run_pipeline(&config(
            dir.path(),
            vec![rotate.clone(), space.clone()],
            WriteFormat::Flip,
        ))
        .unwrap();
        let b = run_pipeline(&config(dir.path(), vec![space, rotate], WriteFormat::Flip)).unwrap();

        assert_ne!(a, b);
        for tile in a.iter().filter(|t| t.name != "cvxif_pau") {
            assert_eq!(tile.orientation, Orientation::N);
        }

        let tile = b.get("Tile_X1Y2_S_term_single").unwrap();
        assert_abs_diff_eq!(tile.x, 2000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tile.y, 105.0, epsilon = 1e-9);
    }

    #[test]
    fn test_apply_step_spacing() {
        let mut tiles = parse_str(MACRO_CFG).unwrap();
        let rules = Rules::default().with_ignore(["cvxif_pau"]);

        apply_step(
            &mut tiles,
            &rules,
            &Step::SpaceVertical {
                space: 10.0,
                pdn_pitch: 75.0,
                start_bot: false,
            },
        )
        .unwrap();
        assert_eq!(tiles.get("Tile_X0Y2_S_term_single").unwrap().y, -75.0);
        assert_eq!(tiles.get("Tile_X0Y1_LUT4AB").unwrap().y, 190.0);

        apply_step(
            &mut tiles,
            &rules,
            &Step::SpaceHorizontal {
                space: 5.0,
                start_left: false,
                window: None,
            },
        )
        .unwrap();
        assert_eq!(tiles.get("Tile_X0Y1_LUT4AB").unwrap().x, -5.0);
        assert_eq!(tiles.get("Tile_X1Y1_LUT4AB").unwrap().x, 100.0);
        assert_eq!(tiles.get("cvxif_pau").unwrap().x, 5000.0);
    }

    #[test]
    fn test_flip_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(
            dir.path(),
            vec![Step::Rotate {
                origin: (0.0, 0.0),
                angle: 0.0,
            }],
            WriteFormat::Flip,
        );
        run_pipeline(&config).unwrap();

        let out = std::fs::read_to_string(config.output.as_ref().unwrap()).unwrap();
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Tile_X0Y0_N_term_single 2000.0 400.0 W");
        assert_eq!(lines[6], "cvxif_pau 5000.0 5000.0 FN");
    }

    #[test]
    fn test_failed_step_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(
            dir.path(),
            vec![Step::SpaceHorizontal {
                space: 5.0,
                start_left: true,
                window: Some(Window { start: 0, stop: 1 }),
            }],
            WriteFormat::Precision,
        );
        config.rules = Rules::default();

        let err = run_pipeline(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TileError>(),
            Some(TileError::Format { .. })
        ));
        assert!(!config.output.as_ref().unwrap().exists());
    }

    #[test]
    fn test_generate_plan_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(
            dir.path(),
            vec![Step::SpaceVertical {
                space: 10.0,
                pdn_pitch: -75.0,
                start_bot: true,
            }],
            WriteFormat::Precision,
        );
        let err = generate_plan(&config).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<TileError>(),
            Some(TileError::Validation(_))
        ));

        config.steps = vec![Step::Translate {
            x_offset: f64::NAN,
            y_offset: 0.0,
        }];
        assert!(generate_plan(&config).is_err());

        config.steps = Vec::new();
        config.output = None;
        let plan = generate_plan(&config).unwrap();
        assert_eq!(plan.output, dir.path().join("macro_tmp_manipulated.cfg"));
        assert_eq!(step_count(&plan), 2);

        config.input = None;
        assert!(generate_plan(&config).is_err());
    }
}
