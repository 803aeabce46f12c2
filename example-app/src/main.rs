//! # 示例应用程序
//!
//! 演示如何通过对象图装配订单服务，并对比单例与原型作用域

mod orders;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use di_abstractions::{Module, ObjectGraph};
use infrastructure_common::Scope;
use infrastructure_composition::{LoggingConfig, ObjectGraphBuilder};
use orders::{
    MemoryOrderContext, Order, OrderContext, OrderContextBindings, OrderService,
    SqlLiteOrderContext,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "对象图容器示例应用")]
struct Args {
    /// 演示模式
    #[arg(value_enum, default_value = "prototype")]
    mode: Mode,

    /// 对象图配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 演示模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// 手动装配，不使用容器
    NoDi,
    /// 通过对象图装配
    Di,
    /// 绑定为单例，两个服务共享同一个上下文
    Singleton,
    /// 绑定为原型，每个服务得到新的上下文
    Prototype,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logging = LoggingConfig::with_level(&args.log_level);

    let order = Order::new("order-123");
    match args.mode {
        Mode::NoDi => {
            // 不构建对象图时直接安装日志
            logging.init()?;
            info!("启动示例应用，模式: {:?}", args.mode);
            let service = OrderService::new(Arc::new(SqlLiteOrderContext));
            service.process_order(&order);
        }
        Mode::Di => {
            let graph = build_graph(&args, logging, Scope::Prototype)?;
            let service = graph.provide::<OrderService>()?;
            service.process_order(&order);
        }
        Mode::Singleton | Mode::Prototype => {
            let scope = if args.mode == Mode::Singleton {
                Scope::Singleton
            } else {
                Scope::Prototype
            };
            let graph = build_graph(&args, logging, scope)?;
            let first = graph.provide::<OrderService>()?;
            let second = graph.provide::<OrderService>()?;
            let shared = Arc::ptr_eq(&first.order_context, &second.order_context);
            info!("两个 OrderService 共享同一个 OrderContext: {}", shared);
            println!("{shared}");
            info!("对象图统计: {:?}", graph.stats());
        }
    }

    Ok(())
}

/// 构建对象图
fn build_graph(args: &Args, logging: LoggingConfig, scope: Scope) -> anyhow::Result<impl ObjectGraph> {
    let module = Module::new("orders")
        .with::<dyn OrderContext>()
        .with::<SqlLiteOrderContext>()
        .with::<MemoryOrderContext>()
        .with::<OrderService>();

    let mut builder = ObjectGraphBuilder::new()
        .with_logging(logging)
        .add_default_env_vars()
        .add_module(module)
        .add_binding_spec(OrderContextBindings { scope });

    if let Some(path) = &args.config {
        builder = builder
            .add_config_file(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?;
    }

    let graph = builder.build().context("对象图构建失败")?;
    info!("启动示例应用，模式: {:?}，order_context 作用域: {}", args.mode, scope);
    Ok(graph)
}
