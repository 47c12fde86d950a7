//! Recipe model
//!
//! A catalog recipe with its ingredients and per-portion nutrition.

use serde::{Deserialize, Deserializer, Serialize};

use super::Ingredient;

/// Nutrition for one portion
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    #[serde(rename = "caloriasTotales", alias = "calories", default)]
    pub calories: f64,
    #[serde(rename = "proteinasTotales", alias = "protein", default)]
    pub protein: f64,     // grams
    #[serde(rename = "grasasTotales", alias = "fat", default)]
    pub fat: f64,         // grams
    #[serde(rename = "carbohidratosTotales", alias = "carbs", default)]
    pub carbs: f64,       // grams
}

impl NutritionSummary {
    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            fat: self.fat * multiplier,
            carbs: self.carbs * multiplier,
        }
    }
}

impl std::ops::Mul<f64> for NutritionSummary {
    type Output = NutritionSummary;

    fn mul(self, multiplier: f64) -> NutritionSummary {
        self.scale(multiplier)
    }
}

/// A recipe from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "tipoDeComida", alias = "meal_type", default)]
    pub meal_type: Option<String>,
    #[serde(rename = "dificultad", alias = "difficulty", default)]
    pub difficulty: Option<String>,
    #[serde(rename = "tiempoPreparacionAproximado", alias = "prep_time", default)]
    pub prep_time: Option<String>,
    #[serde(rename = "ingredientes", alias = "ingredients")]
    pub ingredients: Vec<Ingredient>,
    #[serde(
        rename = "ingredientesOpcionales",
        alias = "optional_ingredients",
        default,
        deserialize_with = "null_as_default"
    )]
    pub optional_ingredients: Vec<Ingredient>,
    #[serde(rename = "instrucciones", alias = "instructions", default, deserialize_with = "null_as_default")]
    pub instructions: Vec<String>,
    #[serde(rename = "consejosDelChef", alias = "chef_tips", default, deserialize_with = "null_as_default")]
    pub chef_tips: Vec<String>,
    #[serde(rename = "resumenNutricional", alias = "nutrition", default)]
    pub nutrition: NutritionSummary,
}

impl Recipe {
    /// Required ingredients, followed by the optional ones if asked for
    pub fn shopping_ingredients(&self, include_optionals: bool) -> impl Iterator<Item = &Ingredient> {
        let optionals: &[Ingredient] = if include_optionals {
            &self.optional_ingredients
        } else {
            &[]
        };
        self.ingredients.iter().chain(optionals.iter())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
