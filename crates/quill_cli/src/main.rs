use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use quill_diagnostics::Emitter;
use quill_driver::{compile_source_with, CompileError, CompileResult};
use quill_syntax::{tokenize, FreeVariables, ParserOptions, TokenKind};
use std::fs;

#[derive(Parser)]
#[command(name = "quillc")]
#[command(about = "Quill 编译器前端 - 词法、语法与作用域检查", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 关闭彩色输出
    #[arg(long, global = true)]
    no_color: bool,

    /// 输出调试日志 (也可以用 RUST_LOG 控制)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// 最多报告的语法错误数量
    #[arg(long, global = true, value_name = "N")]
    max_errors: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// 检查语法错误
    Check {
        /// 输入文件
        input: String,
    },

    /// 输出语法树
    Ast {
        /// 输入文件
        input: String,
    },

    /// 输出 token 序列
    Tokens {
        /// 输入文件
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }
    let emitter = if cli.no_color {
        Emitter::without_colors()
    } else {
        Emitter::new()
    };
    let options = match cli.max_errors {
        Some(max) => ParserOptions::default().with_max_diagnostics(max),
        None => ParserOptions::default(),
    };

    let (input, outcome) = match &cli.command {
        Commands::Check { input } => (input, cmd_check(input, options, &emitter)),
        Commands::Ast { input } => (input, cmd_ast(input, options, &emitter)),
        Commands::Tokens { input } => (input, cmd_tokens(input, &emitter)),
    };

    match outcome {
        Ok(false) => Ok(()),
        Ok(true) => std::process::exit(1),
        Err(err) => match err.downcast_ref::<CompileError>() {
            Some(compile) => {
                compile.emit(Some(input.as_str()), &emitter);
                std::process::exit(1)
            }
            None => Err(err),
        },
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn read_source(input: &str) -> CompileResult<String> {
    info!("reading {}", input);
    Ok(fs::read_to_string(input)?)
}

/// 检查命令
fn cmd_check(input: &str, options: ParserOptions, emitter: &Emitter) -> Result<bool> {
    println!("🔍 checking {} ...", input);

    let source = read_source(input)?;
    let output = compile_source_with(&source, options)?;
    output.emit(input, &source, emitter);

    if output.has_errors() {
        eprintln!("❌ found {} error(s)", output.error_count());
        return Ok(true);
    }

    println!("✅ no errors");
    if !output.exports.is_empty() {
        let exports: Vec<&str> = output.exports.iter().map(String::as_str).collect();
        println!("exports: {}", exports.join(", "));
    }
    Ok(false)
}

/// 语法树命令：每条顶层语句一行，最后是节点数与自由变量
fn cmd_ast(input: &str, options: ParserOptions, emitter: &Emitter) -> Result<bool> {
    let source = read_source(input)?;
    let output = compile_source_with(&source, options)?;

    if let Some(root) = &output.root {
        for statement in &root.children {
            println!("{}", statement);
        }
        let nodes = root.count(|_| true);
        let free = FreeVariables::of(root);
        println!("; {} node(s), free: {}", nodes, free.join(", "));
    }
    output.emit(input, &source, emitter);
    Ok(output.has_errors())
}

/// token 命令
fn cmd_tokens(input: &str, emitter: &Emitter) -> Result<bool> {
    let source = read_source(input)?;
    let lexed = tokenize(&source);

    for token in &lexed.tokens {
        let value = match token.kind {
            TokenKind::Newline => "\\n".to_string(),
            _ => token.value.clone(),
        };
        println!("{:>4}:{:<4} {:?} {}", token.position.line, token.position.column, token.kind, value);
    }
    for diagnostic in &lexed.diagnostics {
        emitter.emit_with_source(diagnostic, input, &source);
    }
    Ok(!lexed.diagnostics.is_empty())
}
