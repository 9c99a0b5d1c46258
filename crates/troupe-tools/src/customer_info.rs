//! Customer information tool
//!
//! Backed by an in-memory fixture database of customers and their orders.
//! All records are read-only after construction.

use crate::{Tool, ToolOutput, required_str};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;
use troupe_common::ToolError;

/// Profile fields returned for a `profile` query.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub level: String,
    pub order_count: usize,
}

/// A single order returned for an `order` query.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    pub order_id: String,
    pub product: String,
    pub status: String,
    pub tracking_number: String,
    pub delivery_date: String,
}

#[derive(Debug, Clone)]
struct CustomerRecord {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    level: &'static str,
    orders: Vec<(&'static str, OrderFixture)>,
}

#[derive(Debug, Clone)]
struct OrderFixture {
    product: &'static str,
    status: &'static str,
    tracking_number: &'static str,
    delivery_date: &'static str,
}

/// Tool answering customer profile and order queries.
pub struct CustomerInfoTool {
    customers: HashMap<&'static str, CustomerRecord>,
}

impl CustomerInfoTool {
    pub fn new() -> Self {
        let mut customers = HashMap::new();
        customers.insert(
            "user123",
            CustomerRecord {
                name: "张三",
                email: "zhangsan@example.com",
                phone: "138****8888",
                level: "VIP",
                orders: vec![
                    (
                        "ORD001",
                        OrderFixture {
                            product: "无线耳机",
                            status: "已发货",
                            tracking_number: "SF1234567890",
                            delivery_date: "2023-10-15",
                        },
                    ),
                    (
                        "ORD002",
                        OrderFixture {
                            product: "智能手表",
                            status: "已签收",
                            tracking_number: "YT0987654321",
                            delivery_date: "2023-09-20",
                        },
                    ),
                ],
            },
        );
        customers.insert(
            "user456",
            CustomerRecord {
                name: "李四",
                email: "lisi@example.com",
                phone: "139****9999",
                level: "普通会员",
                orders: vec![(
                    "ORD003",
                    OrderFixture {
                        product: "蓝牙音箱",
                        status: "处理中",
                        tracking_number: "ZTO111222333",
                        delivery_date: "预计2023-10-25",
                    },
                )],
            },
        );
        Self { customers }
    }
}

impl Default for CustomerInfoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CustomerInfoTool {
    fn name(&self) -> &str {
        "customer_info"
    }

    fn description(&self) -> &str {
        "Query customer information and order details"
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query_type": {
                    "type": "string",
                    "enum": ["profile", "order"],
                    "description": "Whether to fetch the user profile or a single order"
                },
                "user_id": {
                    "type": "string",
                    "description": "Customer identifier"
                },
                "order_id": {
                    "type": "string",
                    "description": "Order identifier, required for order queries"
                }
            },
            "required": ["query_type", "user_id"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolOutput, ToolError> {
        self.validate_params(&params)?;
        let query_type = required_str(&params, "query_type")?;
        let user_id = params
            .get("user_id")
            .and_then(Value::as_str)
            .unwrap_or("guest");
        debug!(query_type, user_id, "customer info lookup");

        let customer = self
            .customers
            .get(user_id)
            .ok_or_else(|| ToolError::UserNotFound {
                user_id: user_id.to_string(),
            })?;

        match query_type {
            "profile" => Ok(ToolOutput::Profile(CustomerProfile {
                user_id: user_id.to_string(),
                name: customer.name.to_string(),
                email: customer.email.to_string(),
                phone: customer.phone.to_string(),
                level: customer.level.to_string(),
                order_count: customer.orders.len(),
            })),
            "order" => {
                let order_id = required_str(&params, "order_id")
                    .map_err(|_| ToolError::MissingParam("order_id"))?;
                let (_, order) = customer
                    .orders
                    .iter()
                    .find(|(id, _)| *id == order_id)
                    .ok_or_else(|| ToolError::OrderNotFound {
                        order_id: order_id.to_string(),
                    })?;
                Ok(ToolOutput::Order(OrderDetails {
                    order_id: order_id.to_string(),
                    product: order.product.to_string(),
                    status: order.status.to_string(),
                    tracking_number: order.tracking_number.to_string(),
                    delivery_date: order.delivery_date.to_string(),
                }))
            }
            other => Err(ToolError::UnsupportedQueryType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn profile_query_returns_fixture_record() {
        let tool = CustomerInfoTool::new();
        let output = tool
            .execute(json!({"query_type": "profile", "user_id": "user123"}))
            .await
            .unwrap();
        match output {
            ToolOutput::Profile(profile) => {
                assert_eq!(profile.name, "张三");
                assert_eq!(profile.level, "VIP");
                assert_eq!(profile.order_count, 2);
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[tokio::test]
    async fn order_query_returns_order_record() {
        let tool = CustomerInfoTool::new();
        let output = tool
            .execute(json!({
                "query_type": "order",
                "order_id": "ORD001",
                "user_id": "user123"
            }))
            .await
            .unwrap();
        match output {
            ToolOutput::Order(order) => {
                assert_eq!(order.order_id, "ORD001");
                assert_eq!(order.product, "无线耳机");
                assert_eq!(order.status, "已发货");
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_user_and_order_are_distinct_errors() {
        let tool = CustomerInfoTool::new();

        let err = tool
            .execute(json!({"query_type": "profile", "user_id": "nobody"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UserNotFound { .. }));

        let err = tool
            .execute(json!({
                "query_type": "order",
                "order_id": "ORD999",
                "user_id": "user123"
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::OrderNotFound { .. }));

        let err = tool
            .execute(json!({"query_type": "order", "user_id": "user123"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingParam("order_id")));
    }

    #[tokio::test]
    async fn unsupported_query_type_is_reported() {
        let tool = CustomerInfoTool::new();
        let err = tool
            .execute(json!({"query_type": "refund", "user_id": "user123"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UnsupportedQueryType(_)));
    }

    #[tokio::test]
    async fn identical_queries_are_deterministic() {
        let tool = CustomerInfoTool::new();
        let params = json!({"query_type": "profile", "user_id": "user456"});
        let a = tool.execute(params.clone()).await.unwrap();
        let b = tool.execute(params).await.unwrap();
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }
}
