//! Line-oriented command session driving both demos.

use std::io::{self, BufRead, Write};

use crossbeam_channel::Receiver;
use playground_api::{OrderManagementApp, PersonManagementApp};
use serde::Serialize;
use shared::{
    domain::{OrderId, OrderItemId, PersonId},
    error::{ApiError, ErrorCode},
    protocol::{
        ChangeEvent, DisplayMode, OrderDetails, OrderItemSummary, OrderItemUpdate, OrderSummary,
        OrderUpdate, Panel, PersonDetails, PersonSummary, PersonUpdate,
    },
};
use tracing::{debug, warn};

use crate::{config::OutputFormat, render};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    ListOrders,
    SelectOrder { order_id: OrderId },
    OrderDetails,
    AddItem,
    DeleteItem { order_item_id: OrderItemId },
    EditItem { order_item_id: OrderItemId, update: OrderItemUpdate },
    EditOrder { order_id: OrderId, update: OrderUpdate },
    ListPersons,
    SelectPerson { person_id: PersonId },
    PersonDetails,
    EditPerson { person_id: PersonId, update: PersonUpdate },
    SwitchMode { mode: DisplayMode },
    View,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Output {
    Orders { orders: Vec<OrderSummary> },
    Order { order: OrderSummary },
    Details { details: Option<OrderDetails> },
    Item { item: OrderItemSummary },
    ItemDeleted { item: OrderItemSummary },
    Persons { persons: Vec<PersonSummary> },
    Person { person: Option<PersonDetails> },
    Mode { mode: DisplayMode },
    View { panel: Option<Panel> },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub commands: usize,
    pub errors: usize,
    pub changes: usize,
}

pub struct Session {
    orders: OrderManagementApp,
    persons: PersonManagementApp,
    changes: Vec<Receiver<ChangeEvent>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(OrderManagementApp::default(), PersonManagementApp::default())
    }
}

impl Session {
    pub fn new(mut orders: OrderManagementApp, mut persons: PersonManagementApp) -> Self {
        let changes = vec![
            orders.store_mut().subscribe(),
            persons.store_mut().subscribe(),
        ];
        Self {
            orders,
            persons,
            changes,
        }
    }

    pub fn execute(&mut self, command: SessionCommand) -> Result<Output, ApiError> {
        let output = match command {
            SessionCommand::ListOrders => Output::Orders {
                orders: self.orders.list_orders(),
            },
            SessionCommand::SelectOrder { order_id } => Output::Order {
                order: self.orders.select_order(order_id)?,
            },
            SessionCommand::OrderDetails => Output::Details {
                details: self.orders.order_details(),
            },
            SessionCommand::AddItem => Output::Item {
                item: self.orders.add_item()?,
            },
            SessionCommand::DeleteItem { order_item_id } => Output::ItemDeleted {
                item: self.orders.delete_item(order_item_id)?,
            },
            SessionCommand::EditItem {
                order_item_id,
                update,
            } => Output::Item {
                item: self.orders.update_item(order_item_id, update)?,
            },
            SessionCommand::EditOrder { order_id, update } => Output::Order {
                order: self.orders.update_order(order_id, update)?,
            },
            SessionCommand::ListPersons => Output::Persons {
                persons: self.persons.list_persons(),
            },
            SessionCommand::SelectPerson { person_id } => Output::Person {
                person: Some(self.persons.select_person(person_id)?),
            },
            SessionCommand::PersonDetails => Output::Person {
                person: self.persons.person_details(),
            },
            SessionCommand::EditPerson { person_id, update } => Output::Person {
                person: Some(self.persons.update_person(person_id, update)?),
            },
            SessionCommand::SwitchMode { mode } => {
                match mode {
                    DisplayMode::EditName => self.persons.switch_to_edit_name(),
                    DisplayMode::PersonList => self.persons.switch_to_person_list(),
                }
                Output::Mode { mode }
            }
            SessionCommand::View => Output::View {
                panel: self.persons.visible_panel(),
            },
        };
        Ok(output)
    }

    /// Pending change events from both stores, oldest first per store.
    pub fn drain_changes(&mut self) -> Vec<ChangeEvent> {
        self.changes.iter().flat_map(|rx| rx.try_iter()).collect()
    }

    /// Runs every line of `input`. Bad lines, including ones that are not UTF-8,
    /// are reported and skipped. Other read failures end the session.
    pub fn run(
        &mut self,
        input: impl BufRead,
        out: &mut impl Write,
        format: OutputFormat,
    ) -> anyhow::Result<SessionStats> {
        let mut stats = SessionStats::default();
        for (line_no, line) in input.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    stats.errors += 1;
                    warn!(line = line_no + 1, "skipping line that is not valid UTF-8");
                    let err = validation(format!("line {} is not valid UTF-8", line_no + 1));
                    render::error(out, format, &err)?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let result = match parse_command(&line) {
                Ok(None) => continue,
                Ok(Some(command)) => {
                    stats.commands += 1;
                    debug!(line = line_no + 1, ?command, "running command");
                    self.execute(command)
                }
                Err(err) => Err(err),
            };

            match result {
                Ok(output) => render::output(out, format, &output)?,
                Err(err) => {
                    stats.errors += 1;
                    warn!(line = line_no + 1, error = %err, "command failed");
                    render::error(out, format, &err)?;
                }
            }

            for event in self.drain_changes() {
                stats.changes += 1;
                debug!(?event, "store changed");
            }
        }
        Ok(stats)
    }
}

/// Parses one session line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, ApiError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (keyword, rest) = split_word(line);

    let command = match keyword {
        "orders" => SessionCommand::ListOrders,
        "select-order" => SessionCommand::SelectOrder {
            order_id: OrderId(parse_id(rest)?),
        },
        "details" => SessionCommand::OrderDetails,
        "add-item" => SessionCommand::AddItem,
        "delete-item" => SessionCommand::DeleteItem {
            order_item_id: OrderItemId(parse_id(rest)?),
        },
        "edit-item" => {
            let (id, fields) = split_word(rest);
            SessionCommand::EditItem {
                order_item_id: OrderItemId(parse_id(id)?),
                update: parse_item_fields(fields)?,
            }
        }
        "set-customer" => {
            let (id, name) = split_word(rest);
            SessionCommand::EditOrder {
                order_id: OrderId(parse_id(id)?),
                update: OrderUpdate {
                    customer_name: Some(name.to_string()),
                    ..OrderUpdate::default()
                },
            }
        }
        "set-limit" => {
            let (id, value) = split_word(rest);
            SessionCommand::EditOrder {
                order_id: OrderId(parse_id(id)?),
                update: OrderUpdate {
                    limit: Some(parse_number("limit", value)?),
                    ..OrderUpdate::default()
                },
            }
        }
        "persons" => SessionCommand::ListPersons,
        "select-person" => SessionCommand::SelectPerson {
            person_id: PersonId(parse_id(rest)?),
        },
        "person" => SessionCommand::PersonDetails,
        "set-first-name" | "set-last-name" | "set-year" => {
            let (id, value) = split_word(rest);
            let mut update = PersonUpdate::default();
            match keyword {
                "set-first-name" => update.first_name = Some(value.to_string()),
                "set-last-name" => update.last_name = Some(value.to_string()),
                _ => {
                    update.year_of_birth = Some(value.parse().map_err(|_| {
                        validation(format!("invalid year of birth '{value}'"))
                    })?)
                }
            }
            SessionCommand::EditPerson {
                person_id: PersonId(parse_id(id)?),
                update,
            }
        }
        "mode" => SessionCommand::SwitchMode {
            mode: match rest {
                "edit-name" | "editName" => DisplayMode::EditName,
                "person-list" | "personList" => DisplayMode::PersonList,
                other => return Err(validation(format!("unknown mode '{other}'"))),
            },
        },
        "view" => SessionCommand::View,
        other => return Err(validation(format!("unknown command '{other}'"))),
    };
    Ok(Some(command))
}

/// `product=Blue Cheese quantity=2`: a token without `=` continues the
/// previous value.
fn parse_item_fields(raw: &str) -> Result<OrderItemUpdate, ApiError> {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    for token in raw.split_whitespace() {
        match token.split_once('=') {
            Some((key, value)) => pairs.push((key, value.to_string())),
            None => match pairs.last_mut() {
                Some((_, value)) => {
                    value.push(' ');
                    value.push_str(token);
                }
                None => return Err(validation(format!("expected field=value, got '{token}'"))),
            },
        }
    }

    let mut update = OrderItemUpdate::default();
    for (key, value) in pairs {
        match key {
            "product" => update.product_name = Some(value),
            "quantity" => update.quantity = Some(parse_number("quantity", &value)?),
            "unit-price" => update.unit_price = Some(parse_number("unit price", &value)?),
            other => return Err(validation(format!("unknown item field '{other}'"))),
        }
    }
    if update.is_empty() {
        return Err(validation("edit-item needs at least one field"));
    }
    Ok(update)
}

fn split_word(raw: &str) -> (&str, &str) {
    let raw = raw.trim();
    match raw.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (raw, ""),
    }
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| validation(format!("invalid id '{}'", raw.trim())))
}

fn parse_number(field: &str, raw: &str) -> Result<f64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| validation(format!("invalid {field} '{}'", raw.trim())))
}

fn validation(message: impl Into<String>) -> ApiError {
    ApiError::new(ErrorCode::Validation, message)
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
