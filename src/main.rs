//! Order console CLI
//!
//! Every invocation starts the console, runs one command and shuts down. The
//! session credential and the draft live in the state directory between runs.

use std::process;

use clap::{Args, Parser, Subcommand};
use console_framework::tracing::setup_tracing;
use console_framework::ActorClient;
use jiff::civil::Date;
use order_console::capability::{Capabilities, Section, ViewKind};
use order_console::checkout::CheckoutForm;
use order_console::config::ConsoleConfig;
use order_console::lifecycle::ConsoleSystem;
use order_console::model::{ProductForm, ProductId, Record};
use order_console::table::{columns, ActionKind, ActionSet, ActionTarget, TableView};
use order_console::tracking::{OrderBook, ReservationTracker};
use tracing::{info, Instrument};

#[derive(Debug, Parser)]
#[command(name = "order-console", about = "Inventory and order console", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConsoleConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in and store the credential
    Login(LoginArgs),
    /// Forget the stored credential
    Logout,
    /// Show the current role and the sections it can open
    Whoami,
    /// List products
    Products(ListArgs),
    /// Create, edit, enable or disable a product
    Product(ProductCommand),
    /// Inspect or change the order draft
    Cart(CartCommand),
    /// Submit the draft as an order
    Checkout(CheckoutArgs),
    /// List submitted orders, show one, or complete it
    Orders(OrderCommand),
    /// Look up and manage reservations
    Reservations(ReservationCommand),
}

#[derive(Debug, Args)]
struct LoginArgs {
    #[arg(long)]
    username: String,

    #[arg(long, env = "CONSOLE_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Case-insensitive text filter over the visible columns
    #[arg(long, default_value = "")]
    search: String,

    /// Column to sort by; repeat to flip the direction
    #[arg(long)]
    sort: Vec<String>,
}

#[derive(Debug, Args)]
struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(ProductFields),
    Edit {
        id: ProductId,
        #[command(flatten)]
        fields: ProductFields,
    },
    Enable {
        id: ProductId,
    },
    Disable {
        id: ProductId,
    },
}

#[derive(Debug, Args)]
struct ProductFields {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    stock: Option<i64>,

    #[arg(long)]
    price: Option<f64>,

    #[arg(long)]
    subcategory: Option<i64>,
}

impl ProductFields {
    fn apply(self, form: ProductForm) -> ProductForm {
        ProductForm {
            name: self.name.unwrap_or(form.name),
            total_stock: self.stock.unwrap_or(form.total_stock),
            unit_price: self.price.unwrap_or(form.unit_price),
            subcategory_id: self.subcategory.or(form.subcategory_id),
            is_active: form.is_active,
        }
    }
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    Show,
    /// Add a product from the catalog
    Add {
        id: ProductId,
        #[arg(long, default_value = "1")]
        quantity: String,
    },
    /// Replace a line's quantity
    Set { id: ProductId, quantity: String },
    Remove {
        id: ProductId,
    },
    Clear,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Extra order field, as `name=value`; repeatable
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,
}

#[derive(Debug, Args)]
struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    List(ListArgs),
    Show { id: i64 },
    Complete { id: i64 },
}

#[derive(Debug, Args)]
struct ReservationCommand {
    #[command(subcommand)]
    command: ReservationSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReservationSubcommand {
    Search {
        dni: String,
    },
    Items {
        id: i64,
    },
    Complete {
        dni: String,
        id: i64,
    },
    Delete {
        dni: String,
        id: i64,
    },
    Deliver {
        dni: String,
        id: i64,
        date: Date,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();
    setup_tracing();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let system = ConsoleSystem::start(&cli.config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("command");
    let result = execute(&system, cli.command).instrument(span).await;

    system.shutdown().await?;
    result
}

async fn execute(system: &ConsoleSystem, command: Commands) -> Result<(), String> {
    match command {
        Commands::Login(args) => {
            let role = system
                .session
                .login(system.backend.as_ref(), &args.username, &args.password)
                .await
                .map_err(|e| e.user_message().to_string())?;
            println!("role: {role}");
            Ok(())
        }
        Commands::Logout => system.session.logout().map_err(|e| e.user_message().to_string()),
        Commands::Whoami => {
            let capabilities = system.session.capabilities();
            println!("role: {}", capabilities.role());
            for section in capabilities.sections() {
                println!("  {}", section.label());
            }
            Ok(())
        }
        Commands::Products(args) => {
            let capabilities = require(system, Section::Products)?;
            let mut catalog = system.catalog();
            catalog.load().await.map_err(|e| e.user_message())?;
            let mut table = catalog.table(&capabilities);
            print_table(&mut table, args)
        }
        Commands::Product(ProductCommand { command }) => product(system, command).await,
        Commands::Cart(CartCommand { command }) => cart(system, command).await,
        Commands::Checkout(args) => checkout(system, args).await,
        Commands::Orders(OrderCommand { command }) => orders(system, command).await,
        Commands::Reservations(ReservationCommand { command }) => reservations(system, command).await,
    }
}

fn require(system: &ConsoleSystem, section: Section) -> Result<Capabilities, String> {
    system.authorize(section).map_err(|e| e.to_string())
}

fn print_table(table: &mut TableView, args: ListArgs) -> Result<(), String> {
    table.set_query(args.search);
    for field in &args.sort {
        table.sort_by(field).map_err(|e| e.to_string())?;
    }
    println!("{}", table.render());
    Ok(())
}

async fn product(system: &ConsoleSystem, command: ProductSubcommand) -> Result<(), String> {
    let capabilities = require(system, Section::Products)?;
    let mut catalog = system.catalog();
    catalog.load().await.map_err(|e| e.user_message())?;
    let table = catalog.table(&capabilities);

    let result = match command {
        ProductSubcommand::Create(fields) => {
            if !capabilities.can_create(ViewKind::Products) {
                return Err(format!("role {} cannot create products", capabilities.role()));
            }
            let form = fields.apply(catalog.new_product_form());
            catalog.create(form).await.map(|record| println!("created: {}", record_id(record)))
        }
        ProductSubcommand::Edit { id, fields } => {
            invoke(&table, id, ActionKind::Edit)?;
            let form = fields.apply(catalog.edit_form(id).map_err(|e| e.user_message())?);
            catalog.update(id, form).await.map(|record| println!("updated: {}", record_id(record)))
        }
        ProductSubcommand::Enable { id } => {
            invoke(&table, id, ActionKind::Enable)?;
            catalog.set_active(id, true).await
        }
        ProductSubcommand::Disable { id } => {
            invoke(&table, id, ActionKind::Disable)?;
            catalog.set_active(id, false).await
        }
    };
    result.map_err(|e| e.user_message())
}

/// Runs `action` on the row whose id is `id`, as a click on that row would.
fn invoke(table: &TableView, id: ProductId, action: ActionKind) -> Result<ActionTarget, String> {
    let row = table
        .rows()
        .iter()
        .position(|record| record.id().and_then(|v| ProductId::try_from(v).ok()) == Some(id))
        .ok_or_else(|| format!("product {id} not found"))?;
    table
        .invoke(row, action)
        .map(|invocation| invocation.target)
        .map_err(|e| e.to_string())
}

fn record_id(record: &Record) -> String {
    record.id().map(|v| v.stringify()).unwrap_or_default()
}

async fn cart(system: &ConsoleSystem, command: CartSubcommand) -> Result<(), String> {
    require(system, Section::Orders)?;
    let result = match command {
        CartSubcommand::Show => {
            let draft = system.draft.snapshot().await.map_err(|e| e.to_string())?;
            let records = draft
                .items()
                .iter()
                .map(|item| {
                    Record::new()
                        .with("id", item.id)
                        .with("name", item.name.as_str())
                        .with("unit_price", item.unit_price)
                        .with("quantity", item.quantity.get())
                        .with("subtotal", item.subtotal())
                })
                .collect();
            let table = TableView::new(
                records,
                columns([
                    ("id", "Código"),
                    ("name", "Producto"),
                    ("unit_price", "Precio"),
                    ("quantity", "Cantidad"),
                    ("subtotal", "Subtotal"),
                ]),
                ActionSet::none(),
            );
            println!("{}", table.render());
            println!("Total: {:.2}", draft.total());
            return Ok(());
        }
        CartSubcommand::Add { id, quantity } => {
            let capabilities = require(system, Section::Products)?;
            let mut catalog = system.catalog();
            catalog.load().await.map_err(|e| e.user_message())?;
            let ActionTarget::Record(record) =
                invoke(&catalog.table(&capabilities), id, ActionKind::AddToCart)?
            else {
                return Err(format!("product {id} cannot be added"));
            };
            system.draft.add_record(&record, quantity.as_str()).await
        }
        CartSubcommand::Set { id, quantity } => system.draft.set_quantity(id, quantity.as_str()).await,
        CartSubcommand::Remove { id } => system.draft.remove(id).await,
        CartSubcommand::Clear => system.draft.clear().await,
    };

    let event = result.map_err(|e| e.to_string())?;
    info!(?event, "Draft updated");
    println!("Total: {:.2}", system.draft.total().await.map_err(|e| e.to_string())?);
    Ok(())
}

async fn checkout(system: &ConsoleSystem, args: CheckoutArgs) -> Result<(), String> {
    let mut form = CheckoutForm::new();
    form.open();
    for (name, value) in args.fields {
        form.set(name, value);
    }

    let result = system.place_order(&mut form).await;
    if let Some(notification) = system.notifier.current() {
        println!("{}", notification.message);
    }
    let receipt = result.map_err(|e| e.user_message().to_string())?;
    println!("Total: {:.2}", receipt.total);
    Ok(())
}

async fn orders(system: &ConsoleSystem, command: OrderSubcommand) -> Result<(), String> {
    let capabilities = require(system, Section::Orders)?;
    let mut book = system.orders();

    match command {
        OrderSubcommand::List(args) => {
            book.load().await.map_err(|e| e.user_message())?;
            print_table(&mut book.table(&capabilities), args)
        }
        OrderSubcommand::Show { id } => {
            let view = book.detail(id).await.map_err(|e| e.user_message())?;
            for (field, value) in view.order.fields() {
                println!("{field}: {value}");
            }
            println!("{}", OrderBook::lines_table(&view, &capabilities).render());
            Ok(())
        }
        OrderSubcommand::Complete { id } => {
            let result = book.complete(id).await;
            if let Some(notification) = system.notifier.current() {
                println!("{}", notification.message);
            }
            result.map_err(|e| e.user_message())?;
            println!("{}", book.table(&capabilities).render());
            Ok(())
        }
    }
}

async fn reservations(system: &ConsoleSystem, command: ReservationSubcommand) -> Result<(), String> {
    let capabilities = require(system, Section::Tracking)?;
    let mut tracker = system.tracker();

    let result = match command {
        ReservationSubcommand::Search { dni } => tracker.search(&dni).await.map(|_| ()),
        ReservationSubcommand::Items { id } => {
            let items = tracker.items(id).await.map_err(|e| e.user_message())?;
            println!("{}", ReservationTracker::items_table(items, &capabilities).render());
            return Ok(());
        }
        ReservationSubcommand::Complete { dni, id } => {
            tracker.search(&dni).await.map_err(|e| e.user_message())?;
            tracker.complete(id).await
        }
        ReservationSubcommand::Delete { dni, id } => {
            tracker.search(&dni).await.map_err(|e| e.user_message())?;
            tracker.delete(id).await
        }
        ReservationSubcommand::Deliver { dni, id, date } => {
            tracker.search(&dni).await.map_err(|e| e.user_message())?;
            tracker.update_delivery_date(id, date).await
        }
    };

    if let Some(notification) = system.notifier.current() {
        println!("{}", notification.message);
    }
    result.map_err(|e| e.user_message())?;
    println!("{}", tracker.table(&capabilities).render());
    Ok(())
}
