use std::io::Write;

use shared::{
    error::ApiError,
    protocol::{OrderItemSummary, OrderSummary, Panel, PersonDetails},
};

use crate::{config::OutputFormat, session::Output};

pub fn output(out: &mut impl Write, format: OutputFormat, output: &Output) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, output),
        OutputFormat::Text => {
            out.write_all(text(output).as_bytes())?;
            Ok(())
        }
    }
}

pub fn error(out: &mut impl Write, format: OutputFormat, err: &ApiError) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &serde_json::json!({ "error": err })),
        OutputFormat::Text => {
            writeln!(out, "error: {}", err.message)?;
            Ok(())
        }
    }
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn text(output: &Output) -> String {
    let mut lines = Vec::new();
    match output {
        Output::Orders { orders } => {
            lines.push("Orders".to_string());
            lines.extend(orders.iter().map(order_line));
        }
        Output::Order { order } => lines.push(order_line(order)),
        Output::Details { details: None } => lines.push("no order selected".to_string()),
        Output::Details {
            details: Some(details),
        } => {
            lines.push("Selected Order".to_string());
            lines.push(order_line(&details.order));
            lines.push("Items".to_string());
            lines.extend(details.items.iter().map(item_line));
        }
        Output::Item { item } => lines.push(item_line(item)),
        Output::ItemDeleted { item } => lines.push(format!("deleted {}", item_line(item))),
        Output::Persons { persons } => {
            lines.push("Persons".to_string());
            lines.extend(
                persons
                    .iter()
                    .map(|p| format!("  [{}] {}", p.person_id, p.full_name)),
            );
        }
        Output::Person { person: None } => lines.push("no person selected".to_string()),
        Output::Person {
            person: Some(person),
        } => person_lines(&mut lines, person),
        Output::Mode { mode } => lines.push(format!("mode: {}", mode.as_str())),
        Output::View { panel: None } => lines.push("(nothing displayed)".to_string()),
        Output::View {
            panel: Some(Panel::EditName { person }),
        } => {
            lines.push("Edit Full Name".to_string());
            match person {
                Some(person) => {
                    lines.push(format!("  First: {}", person.first_name));
                    lines.push(format!("  Last: {}", person.last_name));
                    lines.push(format!("  {}", person.full_name));
                }
                None => lines.push("  no person selected".to_string()),
            }
        }
        Output::View {
            panel: Some(Panel::PersonList { persons, detail }),
        } => {
            lines.push("FullName Demo".to_string());
            lines.extend(
                persons
                    .iter()
                    .map(|p| format!("  [{}] {}", p.person_id, p.full_name)),
            );
            if let Some(detail) = detail {
                person_lines(&mut lines, detail);
            }
        }
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

fn order_line(order: &OrderSummary) -> String {
    let warning = if order.over_limit { "  [over limit]" } else { "" };
    format!(
        "  [{}] customer={} limit={} items={} total={}{warning}",
        order.order_id, order.customer_name, order.limit, order.item_count, order.total
    )
}

fn item_line(item: &OrderItemSummary) -> String {
    format!(
        "  [{}] product={:?} quantity={} unit_price={} total={}",
        item.order_item_id, item.product_name, item.quantity, item.unit_price, item.total
    )
}

fn person_lines(lines: &mut Vec<String>, person: &PersonDetails) {
    lines.push(person.full_name.clone());
    lines.push(format!("  First: {}", person.first_name));
    lines.push(format!("  Last: {}", person.last_name));
    lines.push(format!(
        "  Year of birth: {} Age: {}",
        person.year_of_birth, person.age
    ));
    if let Some(friend_names) = &person.friend_names {
        lines.push(format!("  Friends: {friend_names}"));
    }
}
