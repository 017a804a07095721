extern crate aie_gemv;
extern crate env_logger;
#[macro_use]
extern crate log;

use aie_gemv::config::DEFAULT_ITERATIONS;
use aie_gemv::data::{compare_files, DataParams, GemvData, Y_EXP_FILE, Y_SIM_FILE};
use aie_gemv::geometry::Geometry;
use aie_gemv::params::parse_override;
use aie_gemv::render::standalone::{render_int32_standalone, DEFAULT_OUT_FILE};
use aie_gemv::render::write_all;
use aie_gemv::scheme::{data_8x8_cols, Preset};
use aie_gemv::util::write_file;
use aie_gemv::*;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

const DEFAULT_KERNEL_DIR: &str = "./gemv_kernel";

#[derive(Parser)]
#[command(name = "aie-gemv")]
#[command(about = "Offset schemes, test data and kernel sources for AI-engine GemV kernels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render kernels.cc, kernels.h and graph.cpp for a registered variant
    Kernel {
        /// Input and coefficient dtype (int8/int16/int32), prompted for if left out
        #[arg(long)]
        dtype: Option<DType>,

        /// MAC intrinsic (mac8/mac16/lmac4/lmac8), prompted for if left out
        #[arg(long)]
        intrinsic: Option<Intrinsic>,

        /// Number of inputs
        #[arg(short, long, default_value_t = config::DEFAULT_K)]
        k: usize,

        /// Number of outputs
        #[arg(short, long, default_value_t = config::DEFAULT_N)]
        n: usize,

        /// Name of the generated graph class
        #[arg(long, default_value = config::DEFAULT_GRAPH_NAME)]
        graph_name: String,

        /// Kernel function name, GemV_<x>_<z>_<intrinsic> by default
        #[arg(long)]
        kernel_name: Option<String>,

        /// Number of graph iterations to run
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,

        /// Override a template parameter, eg. --set xstep=32
        #[arg(long = "set", value_parser = parse_override)]
        overrides: Vec<(String, ParamValue)>,

        /// Output directory
        #[arg(short, long, default_value = DEFAULT_KERNEL_DIR)]
        out: PathBuf,
    },
    /// Print a lane index scheme
    Scheme {
        /// Parameter set: 16bx16b, general or 8x8
        preset: Preset,

        #[arg(long)]
        rows: Option<usize>,

        #[arg(long)]
        cols: Option<usize>,

        #[arg(long)]
        start: Option<usize>,

        #[arg(long)]
        step: Option<usize>,

        #[arg(long)]
        buffer_size: Option<usize>,

        /// Lanes of the 8x8 scheme, sets the default rows and columns
        #[arg(long)]
        lanes: Option<usize>,

        /// Data width multiplier of the 8x8 scheme (x2 per 32-bit or complex operand)
        #[arg(long, default_value_t = 1)]
        multiplier: usize,

        /// Print as an aligned table
        #[arg(long)]
        table: bool,
    },
    /// Generate a random matrix, inputs, the expected outputs and matrix.h
    Data {
        #[arg(long, default_value = "int32")]
        dtype: DType,

        #[arg(long, default_value_t = 20)]
        time_steps: usize,

        #[arg(long, default_value_t = 16)]
        dx: usize,

        #[arg(long, default_value_t = 16)]
        dy: usize,

        #[arg(long, default_value_t = 8)]
        dv: usize,

        #[arg(long, default_value_t = 2)]
        q: usize,

        /// Values are drawn from [0, max-value)
        #[arg(long, default_value_t = 10)]
        max_value: i64,

        /// Seed for repeatable data, random otherwise
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Generate the standalone int32 GemV4/GemV8 source
    Int32 {
        /// lmac4 or lmac8
        #[arg(long)]
        lmac: Intrinsic,

        /// Rows of A / output matrix
        #[arg(long)]
        m: usize,

        /// Inner dimension
        #[arg(long)]
        k: usize,

        /// Cols of B / output matrix
        #[arg(long)]
        n: usize,

        #[arg(long, default_value = DEFAULT_OUT_FILE)]
        out: PathBuf,
    },
    /// Compare simulator output against the expected output
    Compare {
        #[arg(long, default_value = Y_EXP_FILE)]
        expected: PathBuf,

        #[arg(long, default_value = Y_SIM_FILE)]
        simulated: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(0) => info!("Exited great."),
        Ok(code) => process::exit(code),
        Err(err) => {
            println!("Error: {}", err);
            process::exit(1);
        }
    }
}

fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Kernel {
            dtype,
            intrinsic,
            k,
            n,
            graph_name,
            kernel_name,
            iterations,
            overrides,
            out,
        } => {
            let (dtype, intrinsic) = match (dtype, intrinsic) {
                (Some(dtype), Some(intrinsic)) => (dtype, intrinsic),
                (dtype, intrinsic) => {
                    let stdin = io::stdin();
                    match prompt_variant(stdin.lock(), &mut io::stdout(), dtype, intrinsic)? {
                        Some(choice) => choice,
                        None => return Ok(1),
                    }
                }
            };

            let mut cfg = KernelConfig::new(dtype, dtype, intrinsic).with_geometry(k, n);
            cfg.graph_name = graph_name;
            cfg.kernel_name = kernel_name;
            cfg.iterations = iterations;
            for (key, value) in overrides {
                cfg = cfg.with_override(&key, value);
            }

            let kernel = match cfg.finalize() {
                Ok(kernel) => kernel,
                Err(err) => {
                    println!("Configuration error: {}", err);
                    if dtype == DType::Int8 && intrinsic == Intrinsic::Mac16 {
                        println!("Tip: For dtype=int8 with K=16, choose intrinsic 'mac8'.");
                    }
                    return Ok(1);
                }
            };
            write_all(&kernel, &out)?;

            let out = fs::canonicalize(&out).unwrap_or(out);
            println!(
                "Wrote kernels.cc, kernels.h and graph.cpp to {}",
                out.display()
            );
            Ok(0)
        }
        Commands::Scheme {
            preset,
            rows,
            cols,
            start,
            step,
            buffer_size,
            lanes,
            multiplier,
            table,
        } => {
            let defaults = preset.geometry();
            let (default_rows, default_cols) = match preset {
                Preset::Data8x8 => {
                    let lanes = lanes.unwrap_or_else(|| defaults.rows());
                    if lanes == 0 || multiplier == 0 {
                        return Err(Error::Geometry(
                            "lanes and multiplier must be nonzero".to_owned(),
                        ));
                    }
                    (lanes, data_8x8_cols(multiplier, lanes))
                }
                _ => (defaults.rows(), defaults.cols()),
            };
            let geom = Geometry::new(
                rows.unwrap_or(default_rows),
                cols.unwrap_or(default_cols),
                start.unwrap_or_else(|| defaults.start()),
                step.unwrap_or_else(|| defaults.step()),
                buffer_size.unwrap_or_else(|| defaults.buffer_size()),
            );
            debug!("Computing {} scheme over {:?}", preset.name(), geom);

            let scheme = preset.compute(&geom)?;
            println!("{}", preset.title());
            if table || preset == Preset::Data8x8 {
                print!("{}", scheme.to_table(3));
            } else {
                print!("{}", scheme);
            }
            Ok(0)
        }
        Commands::Data {
            dtype,
            time_steps,
            dx,
            dy,
            dv,
            q,
            max_value,
            seed,
            out,
        } => {
            let params = DataParams {
                dtype,
                time_steps,
                dx,
                dy,
                dv,
                q,
                max_value,
                ..DataParams::default()
            };
            let data = match seed {
                Some(seed) => GemvData::generate(params, &mut StdRng::seed_from_u64(seed))?,
                None => GemvData::generate(params, &mut rand::thread_rng())?,
            };
            data.write_all(&out)?;
            println!("Wrote test data to {}", out.display());
            Ok(0)
        }
        Commands::Int32 { lmac, m, k, n, out } => {
            let src = render_int32_standalone(lmac, m, k, n)?;
            write_file(&out, &src)?;
            println!("Generated kernel written to {}", out.display());
            Ok(0)
        }
        Commands::Compare {
            expected,
            simulated,
        } => {
            let comparison = compare_files(&expected, &simulated)?;
            println!("{}", comparison);
            Ok(if comparison.is_match() { 0 } else { 1 })
        }
    }
}

/// Asks for whichever of dtype and intrinsic was not given on the command line. The intrinsic
/// must be one the prompt offers for the dtype. Returns `None` after reporting an invalid choice.
fn prompt_variant<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    dtype: Option<DType>,
    intrinsic: Option<Intrinsic>,
) -> Result<Option<(DType, Intrinsic)>> {
    let mut lines = input.lines();
    let mut ask = |output: &mut W, question: &str| -> Result<String> {
        write!(output, "{}", question)?;
        output.flush()?;
        Ok(lines
            .next()
            .transpose()?
            .map(|l| l.trim().to_owned())
            .unwrap_or_default())
    };

    let dtype = match dtype {
        Some(dtype) => dtype,
        None => match ask(&mut *output, "dtype (int8/int16/int32): ")?.parse::<DType>() {
            Ok(dtype) => dtype,
            Err(_) => {
                writeln!(output, "Unsupported dtype. Choose from ['int16', 'int32', 'int8'].")?;
                return Ok(None);
            }
        },
    };

    let allowed = dtype.prompt_intrinsics();
    let intrinsic = match intrinsic {
        Some(intrinsic) => Ok(intrinsic),
        None => {
            writeln!(
                output,
                "Choose intrinsic ({}):",
                allowed
                    .iter()
                    .map(|i| format!("'{}'", i))
                    .collect::<Vec<String>>()
                    .join(", ")
            )?;
            ask(&mut *output, "> ")?.parse::<Intrinsic>()
        }
    };
    match intrinsic {
        Ok(intrinsic) if allowed.contains(&intrinsic) => Ok(Some((dtype, intrinsic))),
        _ => {
            writeln!(output, "Invalid intrinsic choice.")?;
            Ok(None)
        }
    }
}
