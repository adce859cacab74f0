/// Dashboard Walkthrough
///
/// This demo drives one record-listing view end to end:
/// - building a farmer collection owned by the host
/// - free-text search and categorical filtering
/// - sorting with direction toggle
/// - multi-row selection with a tri-state "select all"
/// - a bulk status change that consumes the selection
/// - exporting the projected rows

use tablekit::{
    export_rows, Auxiliary, BulkOp, ComparatorRegistry, FieldValue, FilterConfig, GridEngine,
    Record,
};

fn main() {
    env_logger::init();

    println!("=== TableKit Dashboard Demo ===\n");

    // 1. The host owns the raw collection.
    println!("1. Loading farmers...");
    let mut farmers = vec![
        Record::new("f-1")
            .with_field("name", "Venkata Rao")
            .with_field("village", "Kondapalli")
            .with_field("status", "Active")
            .with_field("age", 52i64),
        Record::new("f-2")
            .with_field("name", "Rao Kumar")
            .with_field("village", "Ibrahimpatnam")
            .with_field("status", "Active")
            .with_field("age", 38i64),
        Record::new("f-3")
            .with_field("name", "Lakshmi Devi")
            .with_field("village", "Kondapalli")
            .with_field("status", "Inactive")
            .with_field("age", 45i64),
        Record::new("f-4")
            .with_field("name", "Suresh Babu")
            .with_field("village", "Penamaluru")
            .with_field("status", "Active")
            .with_field("age", FieldValue::Null),
    ];
    println!("   {} farmers loaded\n", farmers.len());

    // 2. One engine per view, configured once.
    let config = FilterConfig::new()
        .search_field("name")
        .search_field("village")
        .category("Status", "status", ["Active", "Inactive"]);
    let mut engine = GridEngine::new(config, ComparatorRegistry::new());
    let aux = Auxiliary::new();

    // 3. Search + filter + sort.
    println!("2. Searching 'rao', status Active, sorted by age...");
    engine.set_search("rao");
    engine.set_category("Status", "Active");
    engine.request_sort("age");
    for row in engine.projection(&farmers, &aux) {
        println!(
            "   {} - {} ({:?})",
            row.id(),
            row.get("name").search_text(),
            row.get("age")
        );
    }
    println!();

    // 4. Toggle the sort direction; the null age stays last.
    println!("3. Same key again toggles to descending...");
    engine.request_sort("age");
    for row in engine.projection(&farmers, &aux) {
        println!("   {} ({:?})", row.get("name").search_text(), row.get("age"));
    }
    println!();

    // 5. Select everything visible and bulk-deactivate.
    println!("4. Select all visible and bulk set status=Inactive...");
    engine.select_all_visible(&farmers, &aux, true);
    println!("   {} selected", engine.selected_count());

    let op = BulkOp::SetField {
        field: "status".to_string(),
        value: FieldValue::from("Inactive"),
    };
    let affected = engine.apply_bulk(&mut farmers, &op).expect("bulk refused");
    println!(
        "   {} records updated, selection now {}\n",
        affected,
        engine.selected_count()
    );

    // 6. Export what remains visible under the Inactive filter.
    println!("5. Exporting the Inactive view...");
    engine.set_search("");
    engine.set_category("Status", "Inactive");
    let rows = export_rows(&engine.projection(&farmers, &aux));
    for row in &rows {
        println!("   {}", serde_json::to_string(row).expect("serialize row"));
    }
}
