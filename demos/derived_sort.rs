/// Derived Sort Keys Demo
///
/// Sorting tasks by values that are not record fields: the assigned agent's
/// display name (joined through an auxiliary table) and a per-farmer task
/// count. The host rebuilds the auxiliary tables whenever their source
/// collections change; the registry functions only ever see the snapshot
/// they are handed.

use std::collections::HashMap;

use tablekit::{
    Auxiliary, ComparatorRegistry, FieldValue, FilterConfig, GridEngine, Record,
};

fn main() {
    env_logger::init();

    println!("=== TableKit Derived Sort Demo ===\n");

    let tasks = vec![
        Record::new("t-1")
            .with_field("title", "Soil inspection")
            .with_field("farmerId", "f-1")
            .with_field("assignedAgentId", "a-2"),
        Record::new("t-2")
            .with_field("title", "Subsidy application review")
            .with_field("farmerId", "f-2")
            .with_field("assignedAgentId", "a-1"),
        Record::new("t-3")
            .with_field("title", "Irrigation audit")
            .with_field("farmerId", "f-1")
            .with_field("assignedAgentId", "a-1"),
    ];

    // Rebuilt by the host whenever agents or tasks change.
    let mut aux = Auxiliary::new();
    aux.set_table(
        "agent_names",
        vec![
            ("a-1".to_string(), FieldValue::from("Priya Sharma")),
            ("a-2".to_string(), FieldValue::from("Ravi Teja")),
        ],
    );
    let mut counts: HashMap<String, i64> = HashMap::new();
    for t in &tasks {
        *counts.entry(t.get("farmerId").search_text()).or_default() += 1;
    }
    aux.set_table(
        "farmer_task_counts",
        counts.into_iter().map(|(id, n)| (id, FieldValue::Int(n))),
    );

    let mut registry = ComparatorRegistry::new();
    registry.register_derived("agent_name", |record, aux| {
        let id = record.get("assignedAgentId").search_text();
        aux.lookup("agent_names", &id)
    });
    registry.register_derived("farmer_task_count", |record, aux| {
        let id = record.get("farmerId").search_text();
        aux.lookup("farmer_task_counts", &id)
    });

    let config = FilterConfig::new()
        .search_field("title")
        .search_lookup("assignedAgentId", "agent_names");
    let mut engine = GridEngine::new(config, registry);

    println!("1. Tasks by agent name:");
    engine.request_sort("agent_name");
    for row in engine.projection(&tasks, &aux) {
        println!("   {} <- {}", row.get("title").search_text(), row.id());
    }

    println!("\n2. Tasks by the owning farmer's task count, descending:");
    engine.request_sort("farmer_task_count");
    engine.request_sort("farmer_task_count");
    for row in engine.projection(&tasks, &aux) {
        println!(
            "   {} (farmer {})",
            row.get("title").search_text(),
            row.get("farmerId").search_text()
        );
    }

    println!("\n3. Searching by the joined agent name:");
    engine.set_search("priya");
    for row in engine.projection(&tasks, &aux) {
        println!("   {}", row.get("title").search_text());
    }
}
