use anyhow::{Result, anyhow};
use clap::Parser;
use colored::*;
use serde_json::json;
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;
use troupe_agents::{
    Agent, AgentRegistry, CustomerServiceAgent, DataAnalystAgent, LearningAssistantAgent,
    WeatherAgent,
};
use troupe_common::Config;

/// Command-line arguments for the Troupe CLI
#[derive(Parser)]
#[command(
    name = "troupe",
    about = "Troupe - keyword-routed domain agents (weather, data, learning, customer service)"
)]
struct Args {
    /// Agent to chat with (weather, data_analyst, learning_assistant, customer_service)
    #[clap(short, long)]
    agent: Option<String>,

    /// Run the scripted demo across all agents and exit
    #[clap(long)]
    demo: bool,

    /// User id forwarded to the agents
    #[clap(short, long, default_value = "user123")]
    user: String,

    /// Seed for the learning tool's random selection
    #[clap(long)]
    seed: Option<u64>,

    /// Log filter, e.g. "info" or "troupe_agents=debug"
    #[clap(long, default_value = "warn")]
    log_level: String,
}

fn build_registry(args: &Args) -> Result<AgentRegistry> {
    let config = Config::from([
        ("model", json!("qwen-plus")),
        ("temperature", json!(0.7)),
    ]);

    let mut learning = match args.seed {
        Some(seed) => LearningAssistantAgent::with_seed(config.clone(), seed),
        None => LearningAssistantAgent::new(config.clone()),
    };
    learning.set_current_user(&args.user);

    let mut service = CustomerServiceAgent::new(config.clone());
    service.set_current_user(&args.user);

    let mut registry = AgentRegistry::new();
    registry.register(Box::new(WeatherAgent::new(config.clone())))?;
    registry.register(Box::new(DataAnalystAgent::new(config.clone())))?;
    registry.register(Box::new(learning))?;
    registry.register(Box::new(service))?;
    Ok(registry)
}

async fn run_demo(registry: &mut AgentRegistry) -> Result<()> {
    let scenarios: &[(&str, &[&str])] = &[
        (
            "weather",
            &["北京的天气怎么样？", "明天上海天气如何？", "广州的天气"],
        ),
        ("data_analyst", &["请分析数据，数据路径: sample_data.csv"]),
        (
            "learning_assistant",
            &[
                "推荐一些Python学习资源",
                "我想学习人工智能，有什么课程吗？",
                "给我出一道Python练习题",
            ],
        ),
        (
            "customer_service",
            &[
                "我想查询订单 ORD001 的状态",
                "我的个人信息是什么？",
                "你们的退货政策是什么？",
                "配送需要多长时间？",
            ],
        ),
    ];

    for (name, queries) in scenarios {
        let agent = registry
            .get_mut(name)
            .ok_or_else(|| anyhow!("agent `{}` not registered", name))?;
        println!("\n{}", format!("=== {} ===", name).bright_cyan().bold());
        for query in *queries {
            println!("{} {}", "用户:".bright_yellow(), query);
            let reply = agent.get_response(query).await;
            println!("{} {}", "Agent:".bright_green(), reply);
        }
    }
    Ok(())
}

async fn run_interactive(registry: &mut AgentRegistry, name: &str) -> Result<()> {
    let agent = registry
        .get_mut(name)
        .ok_or_else(|| anyhow!("agent `{}` not registered", name))?;

    println!(
        "{} {} ({})",
        "对话开始:".bright_cyan().bold(),
        agent.name().bright_green(),
        agent.description()
    );
    println!("输入 exit 结束对话。");

    let stdin = io::stdin();
    loop {
        print!("{} ", ">".bright_yellow());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = agent.get_response(line).await;
        println!("{} {}", "Agent:".bright_green(), reply);
    }
    println!("再见。");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let mut registry = build_registry(&args)?;
    info!(agents = ?registry.list(), "registry ready");

    match &args.agent {
        Some(name) => run_interactive(&mut registry, name).await,
        None if args.demo => run_demo(&mut registry).await,
        None => {
            println!("{}", "可用的 Agent:".bright_cyan().bold());
            for (name, description) in registry.list() {
                println!("  {} - {}", name.bright_green(), description);
            }
            println!("\n使用 --agent <name> 开始对话，或 --demo 运行示例。");
            Ok(())
        }
    }
}
