//! In-memory entity store for the Agrimarket platform
//!
//! One [`Table`] per entity, each behind its own lock. There are no
//! cross-table transactions: a store call locks exactly one table, and
//! concurrent writers to the same id are last-write-wins with no
//! detection. All list reads come back newest-first (createdAt
//! descending, ties broken by id) so responses are stable across runs;
//! chat transcripts are the one exception and read oldest-first.

mod table;

pub use table::Table;

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use shared::{
    ChatMessage, NewChatMessage, NewProduct, NewRental, NewTool, NewUser, Product, ProductPatch,
    Rental, Tool, ToolPatch, User,
};
use uuid::Uuid;

/// Handle to the shared in-memory store. Cloning is cheap; all clones see
/// the same data.
#[derive(Clone)]
pub struct MemStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    users: Table<User>,
    products: Table<Product>,
    tools: Table<Tool>,
    rentals: Table<Rental>,
    chat_messages: Table<ChatMessage>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                users: Table::new(),
                products: Table::new(),
                tools: Table::new(),
                rentals: Table::new(),
                chat_messages: Table::new(),
            }),
        }
    }

    // Users

    pub async fn get_user(&self, id: &str) -> Option<User> {
        self.inner.users.get(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.inner
            .users
            .filter(|u| u.username == username)
            .await
            .into_iter()
            .next()
    }

    pub async fn create_user(&self, new: NewUser) -> User {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: new.username,
            email: new.email,
            password: new.password,
            full_name: new.full_name,
            phone_number: new.phone_number,
            location: new.location,
            farm_name: new.farm_name,
            profile_image: new.profile_image,
            created_at: Utc::now(),
        };
        self.inner.users.insert(user.id.clone(), user.clone()).await;
        user
    }

    // Products

    pub async fn get_products(&self) -> Vec<Product> {
        let mut products = self.inner.products.all().await;
        sort_products(&mut products);
        products
    }

    pub async fn get_product(&self, id: &str) -> Option<Product> {
        self.inner.products.get(id).await
    }

    pub async fn get_products_by_farmer(&self, farmer_id: &str) -> Vec<Product> {
        let mut products = self.inner.products.filter(|p| p.farmer_id == farmer_id).await;
        sort_products(&mut products);
        products
    }

    pub async fn get_products_by_category(&self, category: &str) -> Vec<Product> {
        let mut products = self.inner.products.filter(|p| p.category == category).await;
        sort_products(&mut products);
        products
    }

    /// Case-insensitive substring search over name, description and
    /// category.
    pub async fn search_products(&self, query: &str) -> Vec<Product> {
        let needle = query.to_lowercase();
        let mut products = self
            .inner
            .products
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description
                        .as_ref()
                        .map_or(false, |d| d.to_lowercase().contains(&needle))
                    || p.category.to_lowercase().contains(&needle)
            })
            .await;
        sort_products(&mut products);
        products
    }

    pub async fn create_product(&self, new: NewProduct) -> Product {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            price: new.price,
            unit: new.unit,
            category: new.category,
            image_url: new.image_url,
            is_organic: new.is_organic,
            farmer_id: new.farmer_id,
            stock: new.stock,
            location: new.location,
            rating: Decimal::ZERO,
            review_count: 0,
            created_at: Utc::now(),
        };
        self.inner
            .products
            .insert(product.id.clone(), product.clone())
            .await;
        product
    }

    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> Option<Product> {
        self.inner.products.update(id, patch).await
    }

    pub async fn delete_product(&self, id: &str) -> bool {
        self.inner.products.remove(id).await
    }

    // Tools

    pub async fn get_tools(&self) -> Vec<Tool> {
        let mut tools = self.inner.tools.all().await;
        sort_tools(&mut tools);
        tools
    }

    pub async fn get_tool(&self, id: &str) -> Option<Tool> {
        self.inner.tools.get(id).await
    }

    pub async fn get_tools_by_owner(&self, owner_id: &str) -> Vec<Tool> {
        let mut tools = self.inner.tools.filter(|t| t.owner_id == owner_id).await;
        sort_tools(&mut tools);
        tools
    }

    pub async fn get_available_tools(&self) -> Vec<Tool> {
        let mut tools = self.inner.tools.filter(|t| t.is_available).await;
        sort_tools(&mut tools);
        tools
    }

    pub async fn create_tool(&self, new: NewTool) -> Tool {
        let tool = Tool {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            daily_rate: new.daily_rate,
            category: new.category,
            image_url: new.image_url,
            owner_id: new.owner_id,
            location: new.location,
            is_available: new.is_available,
            rating: Decimal::ZERO,
            review_count: 0,
            next_available_date: new.next_available_date,
            created_at: Utc::now(),
        };
        self.inner.tools.insert(tool.id.clone(), tool.clone()).await;
        tool
    }

    pub async fn update_tool(&self, id: &str, patch: ToolPatch) -> Option<Tool> {
        self.inner.tools.update(id, patch).await
    }

    pub async fn delete_tool(&self, id: &str) -> bool {
        self.inner.tools.remove(id).await
    }

    // Rentals (append-only: no update or delete)

    pub async fn get_rental(&self, id: &str) -> Option<Rental> {
        self.inner.rentals.get(id).await
    }

    pub async fn get_rentals(&self) -> Vec<Rental> {
        let mut rentals = self.inner.rentals.all().await;
        sort_rentals(&mut rentals);
        rentals
    }

    pub async fn get_rentals_by_renter(&self, renter_id: &str) -> Vec<Rental> {
        let mut rentals = self.inner.rentals.filter(|r| r.renter_id == renter_id).await;
        sort_rentals(&mut rentals);
        rentals
    }

    pub async fn get_rentals_by_tool(&self, tool_id: &str) -> Vec<Rental> {
        let mut rentals = self.inner.rentals.filter(|r| r.tool_id == tool_id).await;
        sort_rentals(&mut rentals);
        rentals
    }

    pub async fn create_rental(&self, new: NewRental) -> Rental {
        let rental = Rental {
            id: Uuid::new_v4().to_string(),
            tool_id: new.tool_id,
            renter_id: new.renter_id,
            start_date: new.start_date,
            end_date: new.end_date,
            total_cost: new.total_cost,
            status: new.status,
            created_at: Utc::now(),
        };
        self.inner
            .rentals
            .insert(rental.id.clone(), rental.clone())
            .await;
        rental
    }

    // Chat messages (append-only)

    /// Transcript for one session, oldest first.
    pub async fn get_chat_messages(&self, session_id: &str) -> Vec<ChatMessage> {
        let mut messages = self
            .inner
            .chat_messages
            .filter(|m| m.session_id == session_id)
            .await;
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        messages
    }

    pub async fn create_chat_message(&self, new: NewChatMessage) -> ChatMessage {
        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            user_id: new.user_id,
            message: new.message,
            is_from_ai: new.is_from_ai,
            session_id: new.session_id,
            created_at: Utc::now(),
        };
        self.inner
            .chat_messages
            .insert(message.id.clone(), message.clone())
            .await;
        message
    }

    /// Populate the store with a small browsable catalog: two farmer
    /// accounts, six produce listings and four tools (one already booked
    /// out). A fresh process then has something to serve.
    pub async fn seed_demo_data(&self) {
        let farmer1 = self
            .create_user(NewUser {
                username: "greenvalley".to_string(),
                email: "john@greenvalleyfarm.com".to_string(),
                password: "hashedpassword".to_string(),
                full_name: "John Smith".to_string(),
                phone_number: Some("+1 (555) 123-4567".to_string()),
                location: Some("California, USA".to_string()),
                farm_name: Some("Green Valley Farm".to_string()),
                profile_image: Some(
                    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face"
                        .to_string(),
                ),
            })
            .await;

        let farmer2 = self
            .create_user(NewUser {
                username: "sunshineacres".to_string(),
                email: "maria@sunshineacres.com".to_string(),
                password: "hashedpassword".to_string(),
                full_name: "Maria Rodriguez".to_string(),
                phone_number: Some("+1 (555) 987-6543".to_string()),
                location: Some("Texas, USA".to_string()),
                farm_name: Some("Sunshine Acres".to_string()),
                profile_image: Some(
                    "https://images.unsplash.com/photo-1494790108755-2616b612b789?w=150&h=150&fit=crop&crop=face"
                        .to_string(),
                ),
            })
            .await;

        for product in demo_products(&farmer1.id, &farmer2.id) {
            self.create_product(product).await;
        }
        for tool in demo_tools(&farmer1.id, &farmer2.id) {
            self.create_tool(tool).await;
        }
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_products(products: &mut [Product]) {
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

fn sort_tools(tools: &mut [Tool]) {
    tools.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

fn sort_rentals(rentals: &mut [Rental]) {
    rentals.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

fn demo_products(farmer1: &str, farmer2: &str) -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Organic Tomatoes".to_string(),
            description: Some(
                "Fresh, vine-ripened organic tomatoes grown using sustainable farming practices."
                    .to_string(),
            ),
            price: Decimal::new(499, 2),
            unit: "per lb".to_string(),
            category: "vegetables".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1592924357228-91a4daadcfea?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300"
                    .to_string(),
            ),
            is_organic: true,
            farmer_id: farmer1.to_string(),
            stock: 50,
            location: Some("California, USA".to_string()),
        },
        NewProduct {
            name: "Farm Fresh Apples".to_string(),
            description: Some(
                "Crisp and sweet apples picked at peak ripeness, including Honeycrisp and Gala."
                    .to_string(),
            ),
            price: Decimal::new(349, 2),
            unit: "per lb".to_string(),
            category: "fruits".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1568702846914-96b305d2aaeb?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300"
                    .to_string(),
            ),
            is_organic: false,
            farmer_id: farmer2.to_string(),
            stock: 75,
            location: Some("Texas, USA".to_string()),
        },
        NewProduct {
            name: "Free-Range Eggs".to_string(),
            description: Some(
                "Fresh eggs from pasture-raised chickens, with rich golden yolks.".to_string(),
            ),
            price: Decimal::new(599, 2),
            unit: "per dozen".to_string(),
            category: "dairy".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1506976785307-8732e854ad03?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300"
                    .to_string(),
            ),
            is_organic: true,
            farmer_id: farmer1.to_string(),
            stock: 30,
            location: Some("California, USA".to_string()),
        },
        NewProduct {
            name: "Organic Carrots".to_string(),
            description: Some(
                "Sweet, crunchy organic carrots grown in rich soil.".to_string(),
            ),
            price: Decimal::new(299, 2),
            unit: "per bunch".to_string(),
            category: "vegetables".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1445282768818-728615cc89ee?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300"
                    .to_string(),
            ),
            is_organic: true,
            farmer_id: farmer2.to_string(),
            stock: 40,
            location: Some("Texas, USA".to_string()),
        },
        NewProduct {
            name: "Fresh Basil".to_string(),
            description: Some(
                "Aromatic fresh basil grown in greenhouse conditions, perfect for pesto."
                    .to_string(),
            ),
            price: Decimal::new(249, 2),
            unit: "per bunch".to_string(),
            category: "herbs".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1618164436241-4473940d1f5c?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300"
                    .to_string(),
            ),
            is_organic: true,
            farmer_id: farmer1.to_string(),
            stock: 25,
            location: Some("California, USA".to_string()),
        },
        NewProduct {
            name: "Seasonal Strawberries".to_string(),
            description: Some(
                "Juicy local strawberries picked at peak ripeness.".to_string(),
            ),
            price: Decimal::new(699, 2),
            unit: "per pint".to_string(),
            category: "fruits".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1464965911861-746a04b4bca6?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300"
                    .to_string(),
            ),
            is_organic: false,
            farmer_id: farmer2.to_string(),
            stock: 20,
            location: Some("Texas, USA".to_string()),
        },
    ]
}

fn demo_tools(farmer1: &str, farmer2: &str) -> Vec<NewTool> {
    vec![
        NewTool {
            name: "John Deere Compact Tractor".to_string(),
            description: Some(
                "Reliable 25HP compact tractor with front loader attachment.".to_string(),
            ),
            daily_rate: Decimal::new(15000, 2),
            category: "tractors".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1544197150-b99a580bb7a8?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=400"
                    .to_string(),
            ),
            owner_id: farmer1.to_string(),
            location: Some("California, USA".to_string()),
            is_available: true,
            next_available_date: None,
        },
        NewTool {
            name: "Professional Rototiller".to_string(),
            description: Some(
                "Heavy-duty rototiller with an 8HP engine and adjustable tilling depth."
                    .to_string(),
            ),
            daily_rate: Decimal::new(7500, 2),
            category: "soil preparation".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=400"
                    .to_string(),
            ),
            owner_id: farmer2.to_string(),
            location: Some("Texas, USA".to_string()),
            is_available: true,
            next_available_date: None,
        },
        NewTool {
            name: "Irrigation System Kit".to_string(),
            description: Some(
                "Complete drip irrigation system for up to 2 acres, with timers and filters."
                    .to_string(),
            ),
            daily_rate: Decimal::new(4500, 2),
            category: "irrigation".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=400"
                    .to_string(),
            ),
            owner_id: farmer1.to_string(),
            location: Some("California, USA".to_string()),
            is_available: false,
            next_available_date: Some(Utc::now() + Duration::days(3)),
        },
        NewTool {
            name: "Seed Planter".to_string(),
            description: Some(
                "Precision seed planter with accurate spacing and depth control.".to_string(),
            ),
            daily_rate: Decimal::new(8500, 2),
            category: "planting".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1544197150-b99a580bb7a8?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=400"
                    .to_string(),
            ),
            owner_id: farmer2.to_string(),
            location: Some("Texas, USA".to_string()),
            is_available: true,
            next_available_date: None,
        },
    ]
}
