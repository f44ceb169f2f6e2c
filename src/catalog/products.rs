use serde::Serialize;

pub static ONLINE_SHOPS: &[&str] = &[
    "Agora", "Ajkerdeal", "Amana big bazar", "Bangla shoppers", "Chaldal", "Daily Bazar",
    "Daily Shopping", "Daraz mart", "GOFRESH", "Grocery", "Jogaan", "Khaas Food", "Kintaini",
    "Meena bazar", "Meenaclick", "MudiiMart", "Othoba", "Paikaree.com.bd", "SobjiBazaar",
    "Shwapno", "Taja Bajar", "Unimart", "Uttara Kacha Bazaar",
];

pub const SHOP_ONLINE: &str = "Online/Supershop";
pub const SHOP_TRADITIONAL: &str = "Traditional-Shop";
pub const SHOP_OTHER: &str = "other";
pub static SHOP_TYPES: &[&str] = &[SHOP_ONLINE, SHOP_TRADITIONAL, SHOP_OTHER];

const LOOSE_PACKET: &[&str] = &["Loose", "Packet", "Other"];
const ORIGINS: &[&str] = &["Deshi", "Indian", "Pakisthani", "Other"];

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    pub unit: &'static str,
    pub purchase_options: &'static [&'static str],
    pub categories: &'static [&'static str],
    pub online_shops: &'static [&'static str],
}

impl Product {
    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }
}

pub static PRODUCTS: &[Product] = &[
    Product {
        id: 1,
        name: "Rice",
        unit: "kg",
        purchase_options: LOOSE_PACKET,
        categories: &["Miniket", "Nazirshall", "Paijam", "Sharna", "Lota", "Other"],
        online_shops: ONLINE_SHOPS,
    },
    Product {
        id: 2,
        name: "Flour",
        unit: "kg",
        purchase_options: LOOSE_PACKET,
        categories: &[],
        online_shops: ONLINE_SHOPS,
    },
    Product {
        id: 3,
        name: "Lentil",
        unit: "kg",
        purchase_options: LOOSE_PACKET,
        categories: &[],
        online_shops: ONLINE_SHOPS,
    },
    Product {
        id: 4,
        name: "Soybean Oil",
        unit: "liter",
        purchase_options: &["Loose", "Bottle", "Other"],
        categories: &[],
        online_shops: ONLINE_SHOPS,
    },
    Product {
        id: 5,
        name: "Salt",
        unit: "kg",
        purchase_options: LOOSE_PACKET,
        categories: &[],
        online_shops: ONLINE_SHOPS,
    },
    Product {
        id: 6,
        name: "Sugar",
        unit: "kg",
        purchase_options: LOOSE_PACKET,
        categories: ORIGINS,
        online_shops: ONLINE_SHOPS,
    },
    Product {
        id: 7,
        name: "Egg",
        unit: "4 pieces",
        purchase_options: &[],
        categories: &[],
        online_shops: ONLINE_SHOPS,
    },
    Product {
        id: 8,
        name: "Chicken",
        unit: "kg",
        purchase_options: &["Live", "Processed with skin", "Processed without skin", "Other"],
        categories: &["Broiler", "Layer", "Sonali", "Other"],
        online_shops: ONLINE_SHOPS,
    },
    Product {
        id: 9,
        name: "Potato",
        unit: "kg",
        purchase_options: &[],
        categories: &["New Potato", "Old Potato", "Other"],
        online_shops: ONLINE_SHOPS,
    },
    Product {
        id: 10,
        name: "Eggplant",
        unit: "kg",
        purchase_options: &[],
        categories: &[],
        online_shops: ONLINE_SHOPS,
    },
    Product {
        id: 11,
        name: "Onion",
        unit: "kg",
        purchase_options: &[],
        categories: ORIGINS,
        online_shops: ONLINE_SHOPS,
    },
    Product {
        id: 12,
        name: "Green Chilli",
        unit: "kg",
        purchase_options: &[],
        categories: &[],
        online_shops: ONLINE_SHOPS,
    },
];
