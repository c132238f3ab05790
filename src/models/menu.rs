// src/models/menu.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const UNKNOWN_LABEL: &str = "Unknown";

// Item do cardápio com o nome da categoria já resolvido (só para rótulos e agrupamento)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRef {
    pub id: Uuid,
    pub name: String,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    items: HashMap<Uuid, MenuItemRef>,
}

impl MenuCatalog {
    pub fn new(items: Vec<MenuItemRef>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.items.contains_key(id)
    }

    /// Item apagado do cardápio vira "Unknown"; o relatório não falha por causa dele.
    pub fn item_name(&self, id: &Uuid) -> &str {
        self.items
            .get(id)
            .map(|item| item.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub fn category_id(&self, id: &Uuid) -> Option<Uuid> {
        self.items.get(id).and_then(|item| item.category_id)
    }

    pub fn category_name(&self, id: &Uuid) -> &str {
        self.items
            .get(id)
            .and_then(|item| item.category_name.as_deref())
            .unwrap_or(UNKNOWN_LABEL)
    }
}
