//! `RoadMap` / `RouteProblem`: weighted undirected city graphs.
//!
//! Cities are interned to [`CityId`] so states are `Copy` and never compare
//! names. Roads are kept in insertion order, which fixes successor order.
//! The heuristic is a per-city table of straight-line estimates to the goal;
//! cities missing from the table estimate zero.

use std::collections::BTreeMap;

use waypoint_search::{Heuristic, StateSpace};

use crate::contract::{World, WorldError};

/// Interned city handle, valid for the map that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CityId(usize);

/// An undirected road network with distances in kilometres.
#[derive(Debug, Clone, Default)]
pub struct RoadMap {
    names: Vec<String>,
    index: BTreeMap<String, CityId>,
    roads: Vec<Vec<(CityId, u32)>>,
}

impl RoadMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, returning the existing id if the city is known.
    pub fn add_city(&mut self, name: &str) -> CityId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = CityId(self.names.len());
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.roads.push(Vec::new());
        id
    }

    /// Add (or re-weight) a two-way road.
    pub fn add_road(&mut self, a: &str, b: &str, km: u32) -> &mut Self {
        let a = self.add_city(a);
        let b = self.add_city(b);
        self.link(a, b, km);
        self.link(b, a, km);
        self
    }

    fn link(&mut self, from: CityId, to: CityId, km: u32) {
        let edges = &mut self.roads[from.0];
        match edges.iter_mut().find(|(c, _)| *c == to) {
            Some(edge) => edge.1 = km,
            None => edges.push((to, km)),
        }
    }

    /// Look up a city by name.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownCity`] if the name is not on the map.
    pub fn city(&self, name: &str) -> Result<CityId, WorldError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| WorldError::UnknownCity {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn name(&self, id: CityId) -> &str {
        self.names.get(id.0).map_or("?", String::as_str)
    }

    /// Roads leaving `id`, in insertion order.
    #[must_use]
    pub fn roads_from(&self, id: CityId) -> &[(CityId, u32)] {
        self.roads.get(id.0).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn city_count(&self) -> usize {
        self.names.len()
    }

    /// Panadura, Moratuwa, Horana, Colombo, Kaduwela and Ratnapura.
    #[must_use]
    pub fn western_province() -> Self {
        let mut map = Self::new();
        map.add_road("Panadura", "Moratuwa", 12)
            .add_road("Panadura", "Horana", 20)
            .add_road("Moratuwa", "Colombo", 18)
            .add_road("Horana", "Ratnapura", 45)
            .add_road("Horana", "Kaduwela", 30)
            .add_road("Colombo", "Kaduwela", 15)
            .add_road("Kaduwela", "Ratnapura", 55);
        map
    }

    /// Panadura, Kalutara, Horana and Colombo.
    #[must_use]
    pub fn kalutara_district() -> Self {
        let mut map = Self::new();
        map.add_road("Panadura", "Kalutara", 20)
            .add_road("Panadura", "Horana", 30)
            .add_road("Horana", "Kalutara", 15)
            .add_road("Kalutara", "Colombo", 50)
            .add_road("Horana", "Colombo", 40);
        map
    }

    /// Render a path as `"A -> B -> C"`.
    #[must_use]
    pub fn format_route(&self, path: &[CityId]) -> String {
        path.iter()
            .map(|&c| self.name(c))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// A start/goal query over a [`RoadMap`].
#[derive(Debug, Clone)]
pub struct RouteProblem {
    map: RoadMap,
    start: CityId,
    goal: CityId,
    estimates: Vec<u32>,
    world_id: String,
}

impl RouteProblem {
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownCity`] if either endpoint is not on the map.
    pub fn new(map: RoadMap, start: &str, goal: &str) -> Result<Self, WorldError> {
        let world_id = format!("road_map:{start}:{goal}");
        let start = map.city(start)?;
        let goal = map.city(goal)?;
        let estimates = vec![0; map.city_count()];
        Ok(Self {
            map,
            start,
            goal,
            estimates,
            world_id,
        })
    }

    /// Set straight-line estimates to the goal.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownCity`] for a name not on the map.
    pub fn with_estimates(mut self, table: &[(&str, u32)]) -> Result<Self, WorldError> {
        for &(name, km) in table {
            let id = self.map.city(name)?;
            self.estimates[id.0] = km;
        }
        Ok(self)
    }

    /// Panadura to Ratnapura with the straight-line table toward Ratnapura.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in map; the `Result` comes from name lookup.
    pub fn panadura_to_ratnapura() -> Result<Self, WorldError> {
        Self::new(RoadMap::western_province(), "Panadura", "Ratnapura")?.with_estimates(&[
            ("Panadura", 60),
            ("Moratuwa", 55),
            ("Colombo", 50),
            ("Kaduwela", 35),
            ("Horana", 25),
            ("Ratnapura", 0),
        ])
    }

    /// Panadura to Colombo over the Kalutara district map.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in map; the `Result` comes from name lookup.
    pub fn panadura_to_colombo() -> Result<Self, WorldError> {
        Self::new(RoadMap::kalutara_district(), "Panadura", "Colombo")?.with_estimates(&[
            ("Panadura", 70),
            ("Kalutara", 50),
            ("Horana", 40),
            ("Colombo", 0),
        ])
    }

    #[must_use]
    pub fn map(&self) -> &RoadMap {
        &self.map
    }

    #[must_use]
    pub fn goal(&self) -> CityId {
        self.goal
    }
}

impl StateSpace for RouteProblem {
    type State = CityId;
    type Cost = u32;

    fn successors(&self, state: &CityId) -> Vec<(CityId, u32)> {
        self.map.roads_from(*state).to_vec()
    }

    fn is_goal(&self, state: &CityId) -> bool {
        *state == self.goal
    }
}

impl Heuristic<CityId, u32> for RouteProblem {
    fn estimate(&self, state: &CityId) -> u32 {
        self.estimates.get(state.0).copied().unwrap_or(0)
    }
}

impl World for RouteProblem {
    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn start(&self) -> CityId {
        self.start
    }

    fn heuristic(&self) -> Option<&dyn Heuristic<CityId, u32>> {
        Some(self)
    }

    fn label(&self, state: &CityId) -> String {
        self.map.name(*state).to_string()
    }
}
