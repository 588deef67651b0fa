//! Demo bakery data for a fresh record store.

use std::collections::BTreeMap;

use serde_json::Value;

use super::file::{Document, UserRecord, hash_password};
use crate::models::{Employee, Entity, Ingredient, Machine, Provider, Recipe};
use crate::session::Role;

fn records<E: Entity>(items: Vec<E>) -> (String, Vec<Value>) {
    let values = items
        .into_iter()
        .filter_map(|item| serde_json::to_value(item).ok())
        .collect();
    (E::PATH.to_string(), values)
}

fn ingredient(
    id: u32,
    name: &str,
    unit: &str,
    stock: f64,
    expiry: &str,
    provider: &str,
) -> Ingredient {
    Ingredient {
        id,
        name: name.into(),
        unit: unit.into(),
        stock,
        expiry: expiry.into(),
        provider: provider.into(),
    }
}

/// A document with an `admin` account (password as given), a `caja` staff
/// account (password `caja`) and a few records per collection.
pub fn demo_document(admin_password: &str) -> Document {
    let users = vec![
        UserRecord {
            username: "admin".into(),
            password_hash: hash_password(admin_password),
            role: Role::Admin,
        },
        UserRecord {
            username: "caja".into(),
            password_hash: hash_password("caja"),
            role: Role::Staff,
        },
    ];

    let mut collections = BTreeMap::new();
    let (path, values) = records(vec![
        ingredient(1, "Harina 000", "kg", 250.0, "15/06/2022", "Molinos Río"),
        ingredient(2, "Levadura fresca", "kg", 12.5, "01/06/2022", "Ledevit"),
        ingredient(3, "Azúcar", "kg", 80.0, "20/12/2023", "Ledesma"),
        ingredient(4, "Manteca", "kg", 30.0, "20/06/2022", "La Serenísima"),
        ingredient(5, "Huevos", "maple", 40.0, "05/06/2022", "Granja Tres Arroyos"),
        ingredient(6, "Sal fina", "kg", 15.0, "01/01/2025", "Celusal"),
        ingredient(7, "Dulce de leche", "kg", 22.0, "30/09/2022", "La Serenísima"),
    ]);
    collections.insert(path, values);

    let recipe = |id, name: &str, category: &str, yield_units, prep_minutes| Recipe {
        id,
        name: name.into(),
        category: category.into(),
        yield_units,
        prep_minutes,
    };
    let (path, values) = records(vec![
        recipe(1, "Pan francés", "Panes", 40, 180),
        recipe(2, "Medialunas", "Facturas", 60, 240),
        recipe(3, "Bizcochitos", "Panes", 120, 90),
        recipe(4, "Alfajores", "Dulces", 24, 120),
        recipe(5, "Pan de molde", "Panes", 8, 200),
        recipe(6, "Vigilantes", "Facturas", 36, 210),
    ]);
    collections.insert(path, values);

    let provider = |id, name: &str, contact: &str, phone: &str, email: &str| Provider {
        id,
        name: name.into(),
        contact: contact.into(),
        phone: phone.into(),
        email: email.into(),
    };
    let (path, values) = records(vec![
        provider(1, "Bimbo", "Laura Pérez", "011 4555-1200", "ventas@bimbo.example"),
        provider(2, "Ledevit", "Martín Gómez", "011 4300-8800", "pedidos@ledevit.example"),
        provider(3, "Molinos Río", "Sofía Ruiz", "0341 420-1100", "harinas@molinos.example"),
        provider(4, "La Serenísima", "Diego Sosa", "011 4800-2000", "lacteos@serenisima.example"),
    ]);
    collections.insert(path, values);

    let machine = |id, name: &str, brand: &str, purchased: &str, last_service: &str| Machine {
        id,
        name: name.into(),
        brand: brand.into(),
        purchased: purchased.into(),
        last_service: last_service.into(),
    };
    let (path, values) = records(vec![
        machine(1, "Amasadora 50kg", "Argental", "10/03/2018", "02/05/2022"),
        machine(2, "Horno rotativo", "Pauna", "22/08/2019", "15/01/2022"),
        machine(3, "Sobadora", "Argental", "05/11/2020", "20/04/2022"),
        machine(4, "Cámara de frío", "Frare", "14/02/2017", "30/03/2022"),
    ]);
    collections.insert(path, values);

    let employee = |id, name: &str, position: &str, phone: &str, hired: &str| Employee {
        id,
        name: name.into(),
        position: position.into(),
        phone: phone.into(),
        hired: hired.into(),
    };
    let (path, values) = records(vec![
        employee(1, "Carla Benítez", "Maestra panadera", "11 5123-4567", "01/02/2015"),
        employee(2, "Julián Ortiz", "Ayudante", "11 5234-5678", "15/07/2021"),
        employee(3, "Marta Ríos", "Cajera", "11 5345-6789", "03/03/2019"),
        employee(4, "Pedro Luna", "Repartidor", "11 5456-7890", "20/10/2020"),
    ]);
    collections.insert(path, values);

    Document { users, collections }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_rows_parse_back_into_entities() {
        let doc = demo_document("pw");
        let ingredients: Vec<Ingredient> =
            serde_json::from_value(Value::Array(doc.collections["insumos"].clone())).unwrap();
        assert_eq!(ingredients.len(), 7);
        for path in ["recetas", "proveedores", "maquinaria", "personal"] {
            assert!(!doc.collections[path].is_empty(), "{path} is empty");
        }
        assert_eq!(doc.users[0].password_hash, hash_password("pw"));
    }
}
