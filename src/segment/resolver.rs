use crate::error::{ContractViolation, Result};
use crate::profile::{CrossSectionProfile, HaunchSpec, NamedSection, SectionPosition, TransitionKind};

use super::{SegmentBoundary, SegmentationParams};

/// Resolves a member's named sections and haunch spec into an ordered,
/// strictly ascending list of segment boundaries spanning `[0, length]`.
///
/// Case table by which positions are present:
/// - one profile: uniform member, 2 boundaries.
/// - start + end: single linear taper.
/// - start + center (or center + end): one transition region near the
///   relevant end, uniform elsewhere.
/// - start + center + end: a transition region at each end with the
///   uniform center region between them, up to 6 boundaries when both
///   transitions are drops.
pub struct ResolveBoundaries {
    sections: Vec<NamedSection>,
    length: f64,
    haunch: HaunchSpec,
    params: SegmentationParams,
}

impl ResolveBoundaries {
    /// Creates a new `ResolveBoundaries` operation.
    ///
    /// * `length` - Member length in mm (from the placement calculator).
    #[must_use]
    pub fn new(
        sections: Vec<NamedSection>,
        length: f64,
        haunch: HaunchSpec,
        params: SegmentationParams,
    ) -> Self {
        Self {
            sections,
            length,
            haunch,
            params,
        }
    }

    /// Executes the resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::NoSections`] when no section is given,
    /// [`ContractViolation::NonPositiveLength`] for a non-positive member
    /// length, and [`ContractViolation::NonAscendingBoundaries`] if the
    /// resolved positions fail the strict ordering check.
    pub fn execute(&self) -> Result<Vec<SegmentBoundary>> {
        if self.length <= 0.0 {
            return Err(ContractViolation::NonPositiveLength(self.length).into());
        }

        let start = self.section_at(SectionPosition::Start);
        let center = self.section_at(SectionPosition::Center);
        let end = self.section_at(SectionPosition::End);

        let boundaries = match (start, center, end) {
            (None, None, None) => return Err(ContractViolation::NoSections.into()),

            // A single profile anywhere: uniform member.
            (Some(p), None, None) | (None, Some(p), None) | (None, None, Some(p)) => {
                vec![
                    SegmentBoundary::new(0.0, p.clone()),
                    SegmentBoundary::new(self.length, p.clone()),
                ]
            }

            // No center: one linear taper across the full length.
            (Some(s), None, Some(e)) => vec![
                SegmentBoundary::new(0.0, s.clone()),
                SegmentBoundary::new(self.length, e.clone()),
            ],

            (Some(s), Some(c), None) => {
                self.require_transition_capacity()?;
                let h = self.clamp_region(self.start_region(), self.length);
                let mut out = vec![SegmentBoundary::new(0.0, s.clone())];
                self.push_transition(&mut out, h, s, c, self.haunch.start_kind);
                out.push(SegmentBoundary::new(self.length, c.clone()));
                out
            }

            (None, Some(c), Some(e)) => {
                self.require_transition_capacity()?;
                let h = self.clamp_region(self.end_region(), self.length);
                let mut out = vec![SegmentBoundary::new(0.0, c.clone())];
                self.push_transition(&mut out, self.length - h, c, e, self.haunch.end_kind);
                out.push(SegmentBoundary::new(self.length, e.clone()));
                out
            }

            (Some(s), Some(c), Some(e)) => {
                self.require_transition_capacity()?;
                let (hs, he) = self.fitted_regions();
                let mut out = vec![SegmentBoundary::new(0.0, s.clone())];
                self.push_transition(&mut out, hs, s, c, self.haunch.start_kind);
                self.push_transition(&mut out, self.length - he, c, e, self.haunch.end_kind);
                out.push(SegmentBoundary::new(self.length, e.clone()));
                out
            }
        };

        validate_ascending(&boundaries)?;
        Ok(boundaries)
    }

    fn section_at(&self, position: SectionPosition) -> Option<&CrossSectionProfile> {
        self.sections
            .iter()
            .find(|s| s.position == position)
            .map(|s| &s.profile)
    }

    fn start_region(&self) -> f64 {
        self.haunch
            .start_length
            .unwrap_or(self.params.haunch_fraction * self.length)
    }

    fn end_region(&self) -> f64 {
        self.haunch
            .end_length
            .unwrap_or(self.params.haunch_fraction * self.length)
    }

    /// Members with transition regions need room for a drop pair at each
    /// end plus a center region between them.
    ///
    /// Without this check the region clamping below would be handed an
    /// empty valid range.
    fn require_transition_capacity(&self) -> Result<()> {
        let minimum = 4.0 * self.params.drop_epsilon;
        if self.length <= minimum {
            return Err(ContractViolation::MemberTooShort {
                length: self.length,
                minimum,
            }
            .into());
        }
        Ok(())
    }

    /// Keeps a transition position clear of both member ends so drop
    /// pairs never collide with the end boundaries.
    fn clamp_region(&self, h: f64, max: f64) -> f64 {
        let margin = self.params.drop_epsilon;
        h.clamp(margin, max - margin)
    }

    /// Start/end region sizes for a 3-section member, scaled down
    /// proportionally when their sum would leave no center region.
    ///
    /// Oversized haunches are legitimate-but-extreme input, resolved
    /// locally rather than raised. Each scaled region is floored at one
    /// drop epsilon so lopsided inputs cannot push a drop pair past the
    /// member start or end.
    fn fitted_regions(&self) -> (f64, f64) {
        let mut hs = self.start_region().max(self.params.drop_epsilon);
        let mut he = self.end_region().max(self.params.drop_epsilon);
        let min_center = 2.0 * self.params.drop_epsilon;
        let available = self.length - min_center;
        if hs + he > available {
            let scale = available / (hs + he);
            hs = (hs * scale).max(self.params.drop_epsilon);
            he = (he * scale).max(self.params.drop_epsilon);
        }
        (hs, he)
    }

    /// Appends the interior boundary (or boundary pair) for one
    /// transition at nominal position `at`, from profile `before` to
    /// profile `after`.
    fn push_transition(
        &self,
        out: &mut Vec<SegmentBoundary>,
        at: f64,
        before: &CrossSectionProfile,
        after: &CrossSectionProfile,
        kind: TransitionKind,
    ) {
        match kind {
            // The wall between the previous boundary and `at` interpolates.
            TransitionKind::Slope => out.push(SegmentBoundary::new(at, after.clone())),
            // Two boundaries straddling `at` force a non-interpolated step
            // face; pair spread stays under 2x the configured epsilon.
            TransitionKind::Drop => {
                let half = self.params.drop_epsilon / 2.0;
                out.push(SegmentBoundary::new(at - half, before.clone()));
                out.push(SegmentBoundary::new(at + half, after.clone()));
            }
        }
    }
}

fn validate_ascending(boundaries: &[SegmentBoundary]) -> Result<()> {
    for pair in boundaries.windows(2) {
        if pair[1].position <= pair[0].position {
            return Err(ContractViolation::NonAscendingBoundaries(pair[0].position).into());
        }
    }
    Ok(())
}
