use crate::core::recommend::{
    pick_random, preferred_beans, preferred_color_ids, score_combinations,
};
use crate::core::CatalogApi;
use crate::domain::model::{Bean, ScoredCombination};
use crate::utils::error::Result;
use rand::Rng;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Recommendations {
    pub preferred_colors: HashSet<String>,
    pub preferred_beans: Vec<Bean>,
    pub combinations: Vec<ScoredCombination>,
    /// Full bean collection, used to show the beans behind a combination.
    pub beans: Vec<Bean>,
}

impl Recommendations {
    /// Beans whose flavor name is one of the combination's tags, matched
    /// exactly (a tag "Black Cherry" does not pull in "Cherry").
    pub fn beans_in(&self, combo: &ScoredCombination) -> Vec<&Bean> {
        self.beans
            .iter()
            .filter(|bean| combo.combination.tags.contains(&bean.flavor_name))
            .collect()
    }

    pub fn lottery<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ScoredCombination> {
        pick_random(&self.combinations, rng)
    }
}

pub struct Recommender<A: CatalogApi> {
    api: A,
}

impl<A: CatalogApi> Recommender<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn recommend(&self) -> Result<Recommendations> {
        tracing::info!("Loading colors, beans and combinations");

        let (colors, beans, combinations) = tokio::try_join!(
            self.api.list_colors(None),
            self.api.fetch_all_beans(),
            self.api.list_combinations(),
        )?;
        tracing::debug!(
            "Loaded {} colors, {} beans, {} combinations",
            colors.data.len(),
            beans.len(),
            combinations.data.len()
        );

        let preferred_colors = preferred_color_ids(&colors.data);
        let preferred = preferred_beans(&beans, &preferred_colors);
        let scored = score_combinations(&combinations.data, &preferred);
        tracing::info!(
            "{} preferred colors, {} preferred beans, {} matching combinations",
            preferred_colors.len(),
            preferred.len(),
            scored.len()
        );

        Ok(Recommendations {
            preferred_colors,
            preferred_beans: preferred,
            combinations: scored,
            beans,
        })
    }
}
