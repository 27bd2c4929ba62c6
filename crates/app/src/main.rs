//! Domicilios CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use domicilios::{
    cart::Cart,
    prices::Price,
    products::{Product, ProductId},
    stores::StoreId,
};
use domicilios_app::{
    auth::Credentials,
    catalog::ProductDraft,
    checkout::CheckoutError,
    config::{self, AppConfig},
    context::AppContext,
    observability,
    payments::PaymentMethod,
};
use rust_decimal::Decimal;
use rusty_money::iso::Currency;

#[derive(Debug, Parser)]
#[command(name = "domicilios", about = "Domicilios storefront CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List stores
    Stores,

    /// List products, optionally for one store
    Products(ProductsArgs),

    /// Add a product to a store's catalog
    AddProduct(AddProductArgs),

    /// Inspect or change the cart
    Cart(CartCommand),

    /// Pay for the cart
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
struct ProductsArgs {
    /// Store to filter by
    #[arg(long)]
    store: Option<StoreId>,
}

#[derive(Debug, Args)]
struct SignInArgs {
    /// Account email
    #[arg(long, env = "DOMICILIOS_EMAIL")]
    email: String,

    /// Account password
    #[arg(long, env = "DOMICILIOS_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct AddProductArgs {
    #[command(flatten)]
    sign_in: SignInArgs,

    /// Owning store
    #[arg(long)]
    store: StoreId,

    /// Product name
    #[arg(long)]
    name: Option<String>,

    /// Product category
    #[arg(long)]
    category: Option<String>,

    /// Price in minor units
    #[arg(long)]
    price: Option<u64>,

    /// Discount percentage
    #[arg(long)]
    discount: Option<Decimal>,

    /// Units in stock
    #[arg(long)]
    stock: Option<u32>,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Image URL
    #[arg(long)]
    image_url: Option<String>,
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show cart lines and totals
    Show,

    /// Add one unit of a product
    Add {
        /// Product to add
        product: ProductId,
    },

    /// Set a line's quantity (values below 1 become 1)
    Set {
        /// Product whose line to change
        product: ProductId,

        /// New quantity
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },

    /// Remove a product's line
    Remove {
        /// Product to remove
        product: ProductId,
    },

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    #[command(flatten)]
    sign_in: SignInArgs,

    /// Provider payment method id
    #[arg(long, default_value = "pm_card_visa")]
    payment_method: String,
}

#[tokio::main]
pub async fn main() {
    config::load_dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init(&cli.config.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let ctx = AppContext::from_config(&cli.config)
        .map_err(|error| format!("failed to start: {error}"))?;

    let result = match cli.command {
        Commands::Stores => list_stores(&ctx).await,
        Commands::Products(args) => list_products(&ctx, args.store).await,
        Commands::AddProduct(args) => add_product(&ctx, args).await,
        Commands::Cart(CartCommand { command }) => cart(&ctx, command).await,
        Commands::Checkout(args) => checkout(&ctx, args).await,
    };

    for notification in ctx.notifications.drain() {
        eprintln!("{}: {}", notification.title, notification.description);
    }

    result
}

async fn list_stores(ctx: &AppContext) -> Result<(), String> {
    let stores = ctx
        .catalog
        .stores()
        .await
        .map_err(|error| format!("failed to list stores: {error}"))?;

    if stores.is_empty() {
        println!("no stores yet");
    }

    for store in stores {
        println!(
            "{}  {}  {}",
            store.id,
            store.name,
            store.category.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

async fn list_products(ctx: &AppContext, store: Option<StoreId>) -> Result<(), String> {
    let page = ctx.catalog.products_page(store).await;

    println!("{}", page.title);

    if page.is_empty() {
        println!("no products found");
    }

    for product in &page.products {
        println!("{}", describe_product(product, ctx.currency));
    }

    Ok(())
}

async fn add_product(ctx: &AppContext, args: AddProductArgs) -> Result<(), String> {
    let session = ctx
        .auth
        .sign_in(&Credentials::new(args.sign_in.email, args.sign_in.password))
        .await
        .map_err(|error| format!("failed to sign in: {error}"))?;

    let draft = ProductDraft {
        name: args.name,
        category: args.category,
        price: args.price.map(Price::new),
        discount: args.discount,
        stock: args.stock,
        description: args.description,
        image_url: args.image_url,
    };

    ctx.catalog
        .add_product(&session, args.store, draft)
        .await
        .map_err(|error| format!("failed to add product: {error}"))
}

async fn cart(ctx: &AppContext, command: CartSubcommand) -> Result<(), String> {
    match command {
        CartSubcommand::Show => {}
        CartSubcommand::Add { product } => {
            let product = ctx
                .catalog
                .product(product)
                .await
                .map_err(|error| format!("failed to load product: {error}"))?
                .ok_or_else(|| format!("product {product} not found"))?;

            ctx.cart.add_item(&product);
        }
        CartSubcommand::Set { product, quantity } => ctx.cart.update_quantity(product, quantity),
        CartSubcommand::Remove { product } => ctx.cart.remove_item(product),
        CartSubcommand::Clear => ctx.cart.clear_cart(),
    }

    print_cart(&ctx.cart.snapshot(), ctx.currency);

    Ok(())
}

async fn checkout(ctx: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    let session = ctx
        .auth
        .sign_in(&Credentials::new(args.sign_in.email, args.sign_in.password))
        .await
        .map_err(|error| format!("failed to sign in: {error}"))?;

    let ready = ctx
        .checkout
        .begin(Some(&session))
        .await
        .map_err(|error| describe_checkout_error(&error))?;

    let summary = ready.summary();

    for line in summary.lines() {
        println!(
            "{} x{}  {}",
            line.name,
            line.quantity,
            line.line_total().to_money(ctx.currency)
        );
    }

    println!("subtotal  {}", summary.subtotal().to_money(ctx.currency));
    println!("shipping  {}", summary.shipping().to_money(ctx.currency));
    println!("total     {}", summary.total().to_money(ctx.currency));

    let outcome = ready
        .submit(&PaymentMethod::new(args.payment_method))
        .await
        .map_err(|error| describe_checkout_error(&error))?;

    println!("payment {:?}, continue at {}", outcome.status, outcome.redirect.location());

    Ok(())
}

fn describe_checkout_error(error: &CheckoutError) -> String {
    match error.redirect() {
        Some(redirect) => format!("checkout stopped: {error} (go to {})", redirect.location()),
        None => format!("checkout failed: {error}"),
    }
}

fn describe_product(product: &Product, currency: &'static Currency) -> String {
    let price = if product.has_discount() {
        format!(
            "{} (was {})",
            product.discounted_price().to_money(currency),
            product.price.to_money(currency)
        )
    } else {
        product.price.to_money(currency).to_string()
    };

    format!(
        "{}  {}  {}  {}",
        product.id,
        product.name,
        price,
        product.store_name().unwrap_or("-")
    )
}

fn print_cart(cart: &Cart, currency: &'static Currency) {
    if cart.is_empty() {
        println!("cart is empty");

        return;
    }

    for line in cart.lines() {
        println!(
            "{}  {} x{}  {}",
            line.product_id,
            line.name,
            line.quantity,
            line.line_total().to_money(currency)
        );
    }

    println!("items     {}", cart.item_count());
    println!("subtotal  {}", cart.subtotal().to_money(currency));
}
