//! Presentation layer: structured tool outcomes to user-facing text
//!
//! Tool code stays text-free; every sentence the user reads is produced
//! here (or by `ToolError::user_message`). The phrasing is load-bearing:
//! keyword-based follow-ups match against it.

use troupe_common::ToolError;
use troupe_tools::ToolOutput;

/// Render a successful tool outcome.
pub fn render_output(output: &ToolOutput) -> String {
    match output {
        ToolOutput::Weather(report) => {
            let prefix = if report.simulated { "【模拟数据】" } else { "" };
            format!(
                "{}{}当前天气：{}，温度{}°C，湿度{}%，风速{}m/s。",
                prefix,
                report.city,
                report.condition,
                report.temperature_c,
                report.humidity_pct,
                report.wind_mps
            )
        }
        ToolOutput::Analysis(report) => {
            let mut text = format!("数据文件 {} 分析结果：\n", report.path);
            text.push_str(&format!(
                "数据形状: ({}, {})\n",
                report.rows,
                report.columns.len()
            ));
            text.push_str(&format!("列名: {:?}\n", report.columns));

            if !report.numeric_stats.is_empty() {
                text.push_str("\n数值列统计:\n");
                for stats in &report.numeric_stats {
                    text.push_str(&format!(
                        "{}: count={} mean={:.2} std={:.2} min={:.2} max={:.2}\n",
                        stats.name, stats.count, stats.mean, stats.std, stats.min, stats.max
                    ));
                }
            }
            if !report.correlations.is_empty() {
                text.push_str("\n数值列相关性:\n");
                for (a, b, r) in &report.correlations {
                    text.push_str(&format!("{} ~ {}: {:.3}\n", a, b, r));
                }
            }
            if let Some(chart) = &report.chart_path {
                text.push_str(&format!("\n已生成图表并保存至: {}", chart));
            }
            text
        }
        ToolOutput::Profile(profile) => {
            let mut text = String::from("用户信息：\n");
            text.push_str(&format!("姓名：{}\n", profile.name));
            text.push_str(&format!("邮箱：{}\n", profile.email));
            text.push_str(&format!("手机号：{}\n", profile.phone));
            text.push_str(&format!("会员等级：{}\n", profile.level));
            text.push_str(&format!("订单数量：{}个\n", profile.order_count));
            text
        }
        ToolOutput::Order(order) => {
            let mut text = format!("订单 {} 信息：\n", order.order_id);
            text.push_str(&format!("商品：{}\n", order.product));
            text.push_str(&format!("状态：{}\n", order.status));
            text.push_str(&format!("快递单号：{}\n", order.tracking_number));
            text.push_str(&format!("预计/实际送达日期：{}\n", order.delivery_date));
            text
        }
        ToolOutput::Knowledge(answer) => {
            if answer.matches.is_empty() {
                format!(
                    "抱歉，我没有找到与您问题直接相关的信息。我们的知识库包含以下主题：{}。\n您可以重新表述问题，或联系人工客服获取更详细的帮助。",
                    answer.topics.join("、")
                )
            } else {
                let mut text = String::from("根据您的问题，找到以下相关信息：\n\n");
                for (i, entry) in answer.matches.iter().enumerate() {
                    text.push_str(&format!("{}. {}\n", i + 1, entry.title));
                    text.push_str(&format!("   {}\n\n", entry.content));
                }
                text
            }
        }
        ToolOutput::Resources(rec) => {
            let mut text = format!("为您推荐以下{}学习资源：\n", rec.subject);
            for (i, resource) in rec.resources.iter().enumerate() {
                text.push_str(&format!(
                    "{}. [{}]({}) - {}\n",
                    i + 1,
                    resource.title,
                    resource.url,
                    resource.kind
                ));
            }
            text
        }
        ToolOutput::Exercise(exercise) => {
            let mut text = format!("{}练习题：\n", exercise.subject);
            text.push_str(&format!("问题：{}\n", exercise.question));
            text.push_str(&format!("答案：{}\n", exercise.answer));
            text
        }
    }
}

/// Render a tool failure. All failures become ordinary reply text.
pub fn render_error(err: &ToolError) -> String {
    err.user_message()
}

#[cfg(test)]
mod tests {
    use super::*;
    use troupe_tools::{KnowledgeAnswer, KnowledgeEntry, WeatherReport};

    #[test]
    fn weather_report_embeds_city_and_values() {
        let text = render_output(&ToolOutput::Weather(WeatherReport {
            city: "北京".to_string(),
            condition: "晴朗".to_string(),
            temperature_c: 22,
            humidity_pct: 65,
            wind_mps: 3,
            simulated: true,
        }));
        assert!(text.contains("北京"));
        assert!(text.contains("天气"));
        assert!(text.contains("22°C"));
        assert!(text.starts_with("【模拟数据】"));
    }

    #[test]
    fn knowledge_matches_are_numbered() {
        let answer = KnowledgeAnswer {
            query: "退货".to_string(),
            matches: vec![
                KnowledgeEntry {
                    title: "退货政策".to_string(),
                    content: "7天无理由退货".to_string(),
                },
                KnowledgeEntry {
                    title: "配送时间".to_string(),
                    content: "1-3个工作日".to_string(),
                },
            ],
            topics: vec![],
        };
        let text = render_output(&ToolOutput::Knowledge(answer));
        assert!(text.contains("1. 退货政策"));
        assert!(text.contains("2. 配送时间"));
    }

    #[test]
    fn knowledge_fallback_lists_topics() {
        let answer = KnowledgeAnswer {
            query: "无关".to_string(),
            matches: vec![],
            topics: vec!["退货政策".to_string(), "配送时间".to_string()],
        };
        let text = render_output(&ToolOutput::Knowledge(answer));
        assert!(text.contains("退货政策、配送时间"));
        assert!(text.contains("抱歉"));
    }
}
