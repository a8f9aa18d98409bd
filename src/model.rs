//! Beam model - continuous beam container and analysis driver

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::{self, AnalysisOptions};
use crate::elements::{BeamElement, Material, Section, SupportType};
use crate::error::{BeamError, BeamResult};
use crate::loads::{Load, LoadCombination, NodalLoad, DEFAULT_COMBO};
use crate::math::{Mat, Vec as DVec};
use crate::results::{AnalysisResults, StaticsCheck};

/// One span of the beam between two adjacent supports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub length: f64,
    pub material: Material,
    pub section: Section,
}

/// A continuous beam on a line of supports
///
/// Node `i` sits at the left end of span `i`; a beam of `n` spans has
/// `n + 1` nodes, each with its own support condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamModel {
    /// Spans from left to right
    pub spans: Vec<Span>,
    /// Support condition at every node
    pub supports: Vec<SupportType>,
    /// Loads on each span
    pub span_loads: Vec<Vec<Load>>,
    /// Loads applied directly at each node
    pub node_loads: Vec<Vec<NodalLoad>>,
    /// Load combinations
    pub load_combos: BTreeMap<String, LoadCombination>,
}

impl BeamModel {
    /// Create a model with the same material and section on every span
    pub fn new(
        spans: &[f64],
        supports: &[SupportType],
        material: Material,
        section: Section,
    ) -> BeamResult<Self> {
        let model = Self {
            spans: spans
                .iter()
                .map(|&length| Span {
                    length,
                    material,
                    section,
                })
                .collect(),
            supports: supports.to_vec(),
            span_loads: vec![Vec::new(); spans.len()],
            node_loads: vec![Vec::new(); supports.len()],
            load_combos: BTreeMap::new(),
        };
        model.validate()?;
        Ok(model)
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Change the material and section of one span
    pub fn set_span_properties(
        &mut self,
        span: usize,
        material: Material,
        section: Section,
    ) -> BeamResult<()> {
        self.check_span(span)?;
        material.validate().map_err(|e| e.context(&format!("span {}", span)))?;
        section.validate().map_err(|e| e.context(&format!("span {}", span)))?;

        self.spans[span].material = material;
        self.spans[span].section = section;
        Ok(())
    }

    /// Add a load to a span
    pub fn add_span_load(&mut self, span: usize, load: impl Into<Load>) -> BeamResult<()> {
        self.check_span(span)?;
        let load = load.into();
        load.validate(self.spans[span].length).map_err(|e| {
            e.context(&format!("load {} on span {}", self.span_loads[span].len(), span))
        })?;

        self.span_loads[span].push(load);
        Ok(())
    }

    /// Add a load directly at a node
    pub fn add_node_load(&mut self, node: usize, load: NodalLoad) -> BeamResult<()> {
        if node >= self.supports.len() {
            return Err(BeamError::DimensionMismatch(format!(
                "node {} out of range for {} nodes",
                node,
                self.supports.len()
            )));
        }
        load.validate().map_err(|e| e.context(&format!("node {}", node)))?;

        self.node_loads[node].push(load);
        Ok(())
    }

    /// Add a load combination
    pub fn add_load_combo(&mut self, combo: LoadCombination) -> BeamResult<()> {
        if self.load_combos.contains_key(&combo.name) {
            return Err(BeamError::DuplicateName(combo.name));
        }
        self.load_combos.insert(combo.name.clone(), combo);
        Ok(())
    }

    // ========================
    // Analysis
    // ========================

    /// Analyze every load combination, in name order
    ///
    /// A model without combinations is analyzed under "Combo 1", which takes
    /// "Case 1" at a factor of 1.0.
    pub fn analyze(&self, options: &AnalysisOptions) -> BeamResult<BTreeMap<String, AnalysisResults>> {
        let combos = self.effective_combos();
        let elements = self.elements()?;
        let k = analysis::global_stiffness_matrix(&elements);

        log::info!(
            "analyzing {} spans, {} load combination(s)",
            elements.len(),
            combos.len()
        );

        let mut results = BTreeMap::new();
        for (name, combo) in &combos {
            let combo_results = self.solve_combo(&elements, &k, combo, options)?;
            results.insert(name.clone(), combo_results);
        }
        Ok(results)
    }

    /// Analyze a single named load combination
    pub fn analyze_combo(&self, name: &str, options: &AnalysisOptions) -> BeamResult<AnalysisResults> {
        let combos = self.effective_combos();
        let combo = combos
            .get(name)
            .ok_or_else(|| BeamError::LoadCombinationNotFound(name.to_string()))?;

        let elements = self.elements()?;
        let k = analysis::global_stiffness_matrix(&elements);
        self.solve_combo(&elements, &k, combo, options)
    }

    /// Check every count, property, and load of the model
    pub fn validate(&self) -> BeamResult<()> {
        if self.spans.is_empty() {
            return Err(BeamError::InvalidGeometry(
                "a beam needs at least one span".to_string(),
            ));
        }
        if self.supports.len() != self.spans.len() + 1 {
            return Err(BeamError::DimensionMismatch(format!(
                "{} supports given for {} spans, expected {}",
                self.supports.len(),
                self.spans.len(),
                self.spans.len() + 1
            )));
        }
        if self.span_loads.len() != self.spans.len() {
            return Err(BeamError::DimensionMismatch(format!(
                "{} span load lists for {} spans",
                self.span_loads.len(),
                self.spans.len()
            )));
        }
        if self.node_loads.len() != self.supports.len() {
            return Err(BeamError::DimensionMismatch(format!(
                "{} node load lists for {} nodes",
                self.node_loads.len(),
                self.supports.len()
            )));
        }

        for (i, (span, loads)) in self.spans.iter().zip(&self.span_loads).enumerate() {
            self.span_element(i, span)?;
            for (j, load) in loads.iter().enumerate() {
                load.validate(span.length)
                    .map_err(|e| e.context(&format!("load {} on span {}", j, i)))?;
            }
        }
        for (i, loads) in self.node_loads.iter().enumerate() {
            for load in loads {
                load.validate().map_err(|e| e.context(&format!("node {}", i)))?;
            }
        }

        Ok(())
    }

    fn solve_combo(
        &self,
        elements: &[BeamElement],
        k: &Mat,
        combo: &LoadCombination,
        options: &AnalysisOptions,
    ) -> BeamResult<AnalysisResults> {
        log::debug!("solving load combination '{}'", combo.name);

        let loads = self.factored_span_loads(combo);
        let nodal = self.factored_node_loads(combo);

        let fixed_end_forces = analysis::local_fixed_end_forces(elements, &loads)?;
        let qf = analysis::global_fixed_end_forces(&fixed_end_forces);

        let d0 = analysis::assemble_displacements(&self.supports);
        let r0 = analysis::assemble_reactions(&self.supports, Some(nodal.as_slice()))?;
        let free_dofs = d0.iter().filter(|dof| !dof.is_known()).count();

        let d_unknown = analysis::displacement(&d0, k, &qf, &r0)?;
        let (d, r) = analysis::reaction(&d0, &d_unknown, k, &qf)?;

        let max_residual = analysis::boundary::reaction_residual(&r, &r0);
        if max_residual > options.tolerance * r.amax().max(1.0) {
            log::warn!(
                "combo '{}': recomputed nodal loads differ from applied loads by up to {:.3e}",
                combo.name,
                max_residual
            );
        }

        // The share of R balancing a load applied at a restrained DOF goes straight into the support
        let support_reactions = DVec::from_iterator(
            d0.len(),
            d0.iter()
                .enumerate()
                .map(|(i, dof)| if dof.is_known() { r[i] - nodal[i] } else { 0.0 }),
        );

        let end_forces = analysis::internal_forces(elements, &d, &fixed_end_forces)?;
        let shear = analysis::shears(elements, &loads, &end_forces, options)?;
        let moment = analysis::moments(elements, &loads, &end_forces, options)?;

        let statics = if options.check_statics {
            let applied: f64 = loads.iter().flatten().map(Load::vertical_force).sum::<f64>()
                - nodal.iter().step_by(2).sum::<f64>();
            let reacted: f64 = support_reactions.iter().step_by(2).sum();
            let check = StaticsCheck::new(applied, reacted, options.tolerance);

            if check.balanced {
                log::debug!("combo '{}': statics check passed, {:.3} applied", combo.name, applied);
            } else {
                log::warn!(
                    "combo '{}': statics check failed, applied {:.6} vs reacted {:.6}",
                    combo.name,
                    applied,
                    reacted
                );
            }
            Some(check)
        } else {
            None
        };

        Ok(AnalysisResults {
            combo: combo.name.clone(),
            k: k.clone(),
            qf,
            d,
            r,
            support_reactions,
            fixed_end_forces,
            end_forces,
            shear,
            moment,
            statics,
            max_residual,
            free_dofs,
        })
    }

    /// Span loads of the cases in a combination, scaled by their factors
    fn factored_span_loads(&self, combo: &LoadCombination) -> Vec<Vec<Load>> {
        self.span_loads
            .iter()
            .map(|loads| {
                loads
                    .iter()
                    .filter(|load| combo.includes(load.case()))
                    .map(|load| load.scaled(combo.factor(load.case())))
                    .collect()
            })
            .collect()
    }

    /// Factored node loads as a global vector in the reaction convention
    fn factored_node_loads(&self, combo: &LoadCombination) -> Vec<f64> {
        let mut r0 = vec![0.0; 2 * self.supports.len()];
        for (node, loads) in self.node_loads.iter().enumerate() {
            for load in loads.iter().filter(|load| combo.includes(&load.case)) {
                let [force, moment] = load.scaled(combo.factor(&load.case)).as_reaction_pair();
                r0[2 * node] += force;
                r0[2 * node + 1] += moment;
            }
        }
        r0
    }

    fn effective_combos(&self) -> BTreeMap<String, LoadCombination> {
        if self.load_combos.is_empty() {
            let mut combos = BTreeMap::new();
            combos.insert(DEFAULT_COMBO.to_string(), LoadCombination::default());
            combos
        } else {
            self.load_combos.clone()
        }
    }

    /// Beam elements of every span
    pub fn elements(&self) -> BeamResult<Vec<BeamElement>> {
        self.validate()?;
        self.spans
            .iter()
            .enumerate()
            .map(|(i, span)| self.span_element(i, span))
            .collect()
    }

    fn span_element(&self, index: usize, span: &Span) -> BeamResult<BeamElement> {
        BeamElement::new(span.material.e, span.section.i, span.length)
            .map_err(|e| e.context(&format!("span {}", index)))
    }

    fn check_span(&self, span: usize) -> BeamResult<()> {
        if span >= self.spans.len() {
            return Err(BeamError::DimensionMismatch(format!(
                "span {} out of range for {} spans",
                span,
                self.spans.len()
            )));
        }
        Ok(())
    }

    // ========================
    // Model Queries
    // ========================

    /// Total length of the beam
    pub fn total_length(&self) -> f64 {
        self.spans.iter().map(|span| span.length).sum()
    }

    /// Position of every node from the left end
    pub fn node_positions(&self) -> Vec<f64> {
        let mut x = 0.0;
        let mut positions = Vec::with_capacity(self.spans.len() + 1);
        positions.push(x);
        for span in &self.spans {
            x += span.length;
            positions.push(x);
        }
        positions
    }

    /// Get all load combination names
    pub fn combo_names(&self) -> Vec<String> {
        self.effective_combos().into_keys().collect()
    }

    /// Get all load case names
    pub fn load_cases(&self) -> Vec<String> {
        let mut cases: Vec<String> = Vec::new();

        for loads in &self.span_loads {
            for load in loads {
                if !cases.iter().any(|c| c == load.case()) {
                    cases.push(load.case().to_string());
                }
            }
        }

        for loads in &self.node_loads {
            for load in loads {
                if !cases.contains(&load.case) {
                    cases.push(load.case.clone());
                }
            }
        }

        cases.sort();
        cases
    }
}
