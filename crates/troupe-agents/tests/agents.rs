//! End-to-end agent behavior tests

use troupe_agents::{
    Agent, CustomerServiceAgent, DataAnalystAgent, LearningAssistantAgent, Role, WeatherAgent,
};
use troupe_common::Config;

fn config() -> Config {
    Config::from([
        ("model", serde_json::json!("test")),
        ("temperature", serde_json::json!(0.7)),
    ])
}

#[tokio::test]
async fn get_response_appends_user_then_assistant() {
    let mut agent = WeatherAgent::new(config());
    assert!(agent.conversation().is_empty());

    let reply = agent.get_response("北京的天气怎么样？").await;

    let entries = agent.conversation().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].role, Role::User);
    assert_eq!(entries[0].content, "北京的天气怎么样？");
    assert_eq!(entries[1].role, Role::Assistant);
    assert_eq!(entries[1].content, reply);

    // Every call appends exactly two more entries.
    agent.get_response("上海的天气").await;
    assert_eq!(agent.conversation().len(), 4);
}

#[tokio::test]
async fn log_discipline_holds_for_every_agent() {
    let mut weather = WeatherAgent::new(config());
    let mut analyst = DataAnalystAgent::new(config());
    let mut learning = LearningAssistantAgent::with_seed(config(), 11);
    let mut service = CustomerServiceAgent::new(config());

    weather.get_response("随便聊聊").await;
    analyst.get_response("随便聊聊").await;
    learning.get_response("随便聊聊").await;
    service.get_response("随便聊聊").await;

    assert_eq!(weather.conversation().len(), 2);
    assert_eq!(analyst.conversation().len(), 2);
    assert_eq!(learning.conversation().len(), 2);
    assert_eq!(service.conversation().len(), 2);
}

#[tokio::test]
async fn weather_agent_answers_city_queries() {
    let mut agent = WeatherAgent::new(config());
    let reply = agent.get_response("北京的天气怎么样？").await;
    assert!(reply.contains("北京"));
    assert!(reply.contains("天气"));

    let reply = agent.get_response("今天天气好吗？").await;
    // The previous turns carry no JSON city memory, so the agent asks.
    assert!(reply.contains("城市"));
}

#[tokio::test]
async fn data_analyst_reports_missing_files_gracefully() {
    let mut agent = DataAnalystAgent::new(config());
    let reply = agent.get_response("请分析数据，数据路径: sample.csv").await;
    assert!(reply.contains("sample.csv"));
    assert!(reply.contains("错误") || reply.contains("分析"));
}

#[tokio::test]
async fn data_analyst_analyzes_real_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.csv");
    std::fs::write(&path, "month,units\n1,10\n2,20\n3,30\n").unwrap();

    let mut agent = DataAnalystAgent::new(config());
    let request = format!("请分析数据，数据路径: {}", path.display());
    let reply = agent.get_response(&request).await;

    assert!(reply.contains("分析结果"));
    assert!(reply.contains("(3, 2)"));
    assert!(reply.contains("units"));
}

#[tokio::test]
async fn learning_assistant_recommends_and_quizzes() {
    let mut agent = LearningAssistantAgent::with_seed(config(), 5);
    agent.set_current_user("user123");

    let reply = agent.get_response("推荐一些Python学习资源").await;
    assert!(reply.contains("Python"));
    assert!(reply.contains("推荐"));

    let reply = agent.get_response("给我出一道Python练习题").await;
    assert!(reply.contains("练习题"));
    assert!(reply.contains("问题"));
    assert!(reply.contains("答案"));
}

#[tokio::test]
async fn customer_service_covers_all_branches() {
    let mut agent = CustomerServiceAgent::new(config());
    agent.set_current_user("user123");

    let reply = agent.get_response("我想查询订单 ORD001 的状态").await;
    assert!(reply.contains("ORD001"));
    assert!(reply.contains("无线耳机"));

    let reply = agent.get_response("我的个人信息是什么？").await;
    assert!(reply.contains("张三"));
    assert!(reply.contains("姓名"));

    let reply = agent.get_response("你们的退货政策是什么？").await;
    assert!(reply.contains("退货"));
    assert!(reply.contains("7天"));

    let reply = agent.get_response("配送需要多长时间？").await;
    assert!(reply.contains("配送"));
}

#[tokio::test]
async fn deterministic_tools_repeat_exactly() {
    let mut agent = CustomerServiceAgent::new(config());
    agent.set_current_user("user456");

    let first = agent.get_response("我的个人信息是什么？").await;
    let second = agent.get_response("我的个人信息是什么？").await;
    assert_eq!(first, second);
    assert!(first.contains("李四"));
}
