mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use storefront_api::{AirtableClient, CloudinaryClient, DummyJsonClient};
use storefront_core::{
    config::AIRTABLE_TOKEN_ENV,
    options,
    providers::{AirtableCatalog, AirtableLedger, CloudinaryUploader, DummyJsonCatalog, LedgerKind},
    ApiType, Config, FailureReason, PriceSort, ProductForm, ProductId, ProductStore, Sources,
    UploadFile,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(version, about = "Browse, favorite and publish products across two catalogs", long_about = None)]
struct Cli {
    /// Airtable personal access token (overrides the config file)
    #[arg(long, global = true, env = "STOREFRONT_AIRTABLE_TOKEN", hide_env_values = true)]
    airtable_token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List the merged catalog, one page at a time
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Only show favorites
        #[arg(long)]
        favorites: bool,

        #[arg(long, value_enum, default_value_t = SortArg::None)]
        sort: SortArg,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show product details
    Show {
        id: String,

        /// Catalog to ask: dummyApi or airtable (guessed from the id if omitted)
        #[arg(long)]
        source: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Add or remove a product from favorites
    Favorite { id: String },
    /// Hide a product from the listing for good
    Delete { id: String },
    /// Upload images and add a product to the Airtable catalog
    Create(CreateArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SortArg {
    None,
    Asc,
    Desc,
}

impl From<SortArg> for PriceSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::None => PriceSort::NotApplied,
            SortArg::Asc => PriceSort::Asc,
            SortArg::Desc => PriceSort::Desc,
        }
    }
}

#[derive(clap::Args)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    price: String,
    /// e.g. home-decoration, laptops, groceries
    #[arg(long)]
    category: String,
    #[arg(long, default_value = "")]
    rating: String,
    #[arg(long, default_value = "0")]
    stock: String,
    #[arg(long, default_value = "")]
    brand: String,
    #[arg(long, default_value = "")]
    sku: String,
    #[arg(long, default_value = "0")]
    weight: String,
    #[arg(long, default_value = "1-year-warranty")]
    warranty: String,
    #[arg(long, default_value = "ships-in-1-week")]
    shipping: String,
    #[arg(long, default_value = "in_stock")]
    availability: String,
    #[arg(long, default_value = "30_days")]
    return_policy: String,
    #[arg(long = "moq", default_value = "1")]
    minimum_order_quantity: String,
    #[arg(long, default_value = "0")]
    width: String,
    #[arg(long, default_value = "0")]
    height: String,
    #[arg(long, default_value = "0")]
    depth: String,
    /// 12-digit UPC
    #[arg(long)]
    barcode: String,
    #[arg(long)]
    thumbnail: PathBuf,
    /// Gallery image, repeat for more
    #[arg(long = "image")]
    images: Vec<PathBuf>,
}

impl CreateArgs {
    async fn into_form(self) -> anyhow::Result<ProductForm> {
        let thumbnail = UploadFile::from_path(&self.thumbnail)
            .await
            .with_context(|| format!("Failed to read {}", self.thumbnail.display()))?;

        let mut images = Vec::with_capacity(self.images.len());
        for path in &self.images {
            let file = UploadFile::from_path(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            images.push(file);
        }

        Ok(ProductForm {
            category: options::lookup("category", options::CATEGORIES, &self.category)?,
            warranty_information: options::lookup(
                "warrantyInformation",
                options::WARRANTIES,
                &self.warranty,
            )?,
            shipping_information: options::lookup(
                "shippingInformation",
                options::SHIPPING,
                &self.shipping,
            )?,
            availability_status: options::lookup(
                "availabilityStatus",
                options::AVAILABILITY,
                &self.availability,
            )?,
            return_policy: options::lookup(
                "returnPolicy",
                options::RETURN_POLICIES,
                &self.return_policy,
            )?,
            title: self.title,
            description: self.description,
            price: self.price,
            rating: self.rating,
            stock: self.stock,
            brand: self.brand,
            sku: self.sku,
            weight: self.weight,
            minimum_order_quantity: self.minimum_order_quantity,
            width: self.width,
            height: self.height,
            depth: self.depth,
            barcode: self.barcode,
            thumbnail: vec![thumbnail],
            images,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?.with_token_override(cli.airtable_token);

    let Some(command) = cli.command else {
        println!("No command specified. Try --help");
        return Ok(());
    };

    let store = build_store(&config)?;

    match command {
        Commands::Config => {
            println!("# {}", Config::config_path()?.display());
            print!("{}", toml::to_string_pretty(&config.redacted())?);
        }
        Commands::List {
            page,
            favorites,
            sort,
            json,
        } => {
            store.open_listing().await.map_err(failure)?;
            store.set_favorite_only(favorites).await;
            store.set_price_sort(sort.into()).await;
            store.set_page(page).await;

            let listing = store.snapshot().await.listing;
            if json {
                println!("{}", serde_json::to_string_pretty(&listing.visible_page)?);
            } else {
                print!("{}", render::listing(&listing));
            }
        }
        Commands::Show { id, source, json } => {
            let id = ProductId::parse(&id);
            let source = source.unwrap_or_else(|| guess_source(&id).to_string());
            tracing::info!("Showing {} from {}", id, source);

            let product = store.fetch_detail(&id, &source).await.map_err(failure)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&product)?);
            } else {
                print!("{}", render::product(&product));
            }
        }
        Commands::Favorite { id } => {
            let id = ProductId::parse(&id);
            let now_favorite = store.toggle_favorite(&id).await.map_err(failure)?;
            if now_favorite {
                println!("★ {} added to favorites", id);
            } else {
                println!("☆ {} removed from favorites", id);
            }
        }
        Commands::Delete { id } => {
            let id = ProductId::parse(&id);
            store.delete_product(&id).await.map_err(failure)?;
            println!("Deleted {}", id);
        }
        Commands::Create(args) => {
            let form = args.into_form().await?;
            let created = store.create_product(&form).await.map_err(failure)?;
            println!("Created {} in {}", created.id, created.api_type);
            println!("View it with: storefront show {} --source {}", created.id, created.api_type);
            store.reset_create().await;
        }
    }

    Ok(())
}

/// Wire the API clients into the store
fn build_store(config: &Config) -> anyhow::Result<ProductStore> {
    let timeout = config.catalog.timeout_secs;
    let airtable = &config.airtable;

    if airtable.token.is_none() {
        tracing::warn!(
            "No Airtable token configured; set {} or pass --airtable-token",
            AIRTABLE_TOKEN_ENV
        );
    }

    let table = |name: &str| {
        AirtableClient::with_base_url(
            &airtable.api_url,
            &airtable.base_id,
            name,
            airtable.token.clone(),
            timeout,
        )
    };

    let dummyjson = DummyJsonClient::with_base_url(config.catalog.base_url.clone(), timeout)?;
    let products = Arc::new(AirtableCatalog::new(table(&airtable.product_table)?));
    let favorites = AirtableLedger::new(
        table(&airtable.favorite_table)?,
        airtable.favorite_record_id.clone(),
        LedgerKind::Favorite,
    );
    let deleted = AirtableLedger::new(
        table(&airtable.deleted_table)?,
        airtable.deleted_record_id.clone(),
        LedgerKind::Deleted,
    );
    let uploader = CloudinaryClient::with_base_url(
        &config.uploads.api_url,
        &config.uploads.cloud_name,
        &config.uploads.upload_preset,
        config.uploads.timeout_secs,
    )?;

    Ok(ProductStore::new(Sources {
        dummyjson: Arc::new(DummyJsonCatalog::new(dummyjson)),
        airtable: products.clone(),
        product_writer: products,
        favorites: Arc::new(favorites),
        deleted: Arc::new(deleted),
        uploader: Arc::new(CloudinaryUploader::new(uploader)),
    }))
}

/// DummyJSON ids are integers, Airtable record ids never are
fn guess_source(id: &ProductId) -> ApiType {
    match id {
        ProductId::Numeric(_) => ApiType::DummyJson,
        ProductId::Text(_) => ApiType::Airtable,
    }
}

fn failure(reason: FailureReason) -> anyhow::Error {
    anyhow!("{} ({})", reason.message(), reason)
}
