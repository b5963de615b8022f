use crate::core::animation::advance_position;
use crate::core::{
    Animation, Completion, EJECT_FALL_FLOOR, Direction, GameEvent, GridLoc, LevelLayout,
    MapObject, ObjectId, ObjectKind, Occupancy, SoundCue, StepOutcome,
};
use tracing::debug;

/// Owns the mutable per-session state of one level: the live occupancy
/// view over the layout, the object table, the pending animations, and
/// the interactive-move latch. All rule resolution happens here.
///
/// Logical transitions are applied to the grid the moment they are
/// issued; their visible completion is deferred to a later `update` tick,
/// which dispatches the queued `Completion` back into the rule engine.
pub struct LevelController {
    layout: LevelLayout,
    objects: Vec<MapObject>,
    occupancy: Occupancy,
    gopher: ObjectId,
    boxes: Vec<ObjectId>,
    elevators: Vec<ObjectId>,
    pending: Vec<Animation>,
    reset_pending: bool,
    animating: bool,
    locked: bool,
    steps: u32,
    events: Vec<GameEvent>,
}

fn add_object(
    objects: &mut Vec<MapObject>,
    occupancy: &mut Occupancy,
    kind: ObjectKind,
    loc: GridLoc,
) -> ObjectId {
    let id = ObjectId(objects.len());
    objects.push(MapObject::new(kind, loc));
    occupancy.set(&loc, Some(id));
    id
}

impl LevelController {
    pub fn new(layout: LevelLayout) -> LevelController {
        let mut objects = Vec::new();
        let mut occupancy = Occupancy::new(layout.extent);

        let gopher = add_object(
            &mut objects,
            &mut occupancy,
            ObjectKind::Gopher,
            layout.gopher_start,
        );
        let boxes: Vec<ObjectId> = layout
            .box_starts
            .iter()
            .map(|&loc| add_object(&mut objects, &mut occupancy, ObjectKind::Box, loc))
            .collect();
        for &loc in &layout.blocks {
            add_object(&mut objects, &mut occupancy, ObjectKind::Block, loc);
        }
        let elevators: Vec<ObjectId> = layout
            .elevators
            .iter()
            .map(|e| {
                add_object(
                    &mut objects,
                    &mut occupancy,
                    ObjectKind::Elevator {
                        low: e.low,
                        high: e.high,
                    },
                    e.loc,
                )
            })
            .collect();

        LevelController {
            layout,
            objects,
            occupancy,
            gopher,
            boxes,
            elevators,
            pending: Vec::new(),
            reset_pending: false,
            animating: false,
            locked: false,
            steps: 0,
            events: Vec::new(),
        }
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> &MapObject {
        &self.objects[id.0]
    }

    pub fn gopher_id(&self) -> ObjectId {
        self.gopher
    }

    pub fn box_ids(&self) -> &[ObjectId] {
        &self.boxes
    }

    pub fn elevator_ids(&self) -> &[ObjectId] {
        &self.elevators
    }

    pub fn occupant(&self, loc: &GridLoc) -> Option<ObjectId> {
        self.occupancy.get(loc)
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn has_pending_animations(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True iff every pad location holds a box.
    pub fn level_complete(&self) -> bool {
        self.layout.pads.iter().all(|p| {
            self.occupancy
                .get(p)
                .is_some_and(|id| self.objects[id.0].is_box())
        })
    }

    /// One interactive step. Gated by the animating latch; non-interactive
    /// chained transitions (falls, elevators) are not.
    pub fn step(&mut self, dir: Direction) -> StepOutcome {
        if self.animating || self.locked {
            return StepOutcome::Ignored;
        }

        let (zd, xd) = dir.delta();
        let gopher_loc = self.objects[self.gopher.0].loc;
        let dest = gopher_loc.offset(zd, xd, 0);
        if !self.occupancy.contains(&dest) {
            self.bump();
            return StepOutcome::Bumped;
        }

        match self.occupancy.get(&dest) {
            None => {
                self.move_gopher_to(dest);
                StepOutcome::Stepped
            }
            Some(c) if self.objects[c.0].pushable() => {
                // Room behind the pushed object?
                let beyond = gopher_loc.offset(2 * zd, 2 * xd, 0);
                if self.occupancy.contains(&beyond) && self.occupancy.get(&beyond).is_none() {
                    self.push_chain(c, beyond);
                    self.move_gopher_to(dest);
                    StepOutcome::Pushed
                } else {
                    self.bump();
                    StepOutcome::Bumped
                }
            }
            Some(_) => {
                self.bump();
                StepOutcome::Bumped
            }
        }
    }

    fn bump(&mut self) {
        debug!("hit wall");
        self.sound(SoundCue::Bump, None);
    }

    fn sound(&mut self, cue: SoundCue, source: Option<ObjectId>) {
        self.events.push(GameEvent::Sound { cue, source });
    }

    fn is_elevator(&self, id: ObjectId) -> bool {
        matches!(self.objects[id.0].kind, ObjectKind::Elevator { .. })
    }

    /// Queues a motion and applies the logical move immediately.
    fn animate(&mut self, id: ObjectId, dest: GridLoc, on_complete: Completion) {
        debug!(?id, ?dest, "queueing animation");
        self.pending.push(Animation::new(id, dest.vec3(), on_complete));

        let src = self.objects[id.0].loc;
        self.occupancy.clear_if(&src, id);
        self.occupancy.set(&dest, Some(id));
        self.objects[id.0].loc = dest;
    }

    /// Like `animate` but for objects leaving the game: removed from
    /// occupancy, never written to a destination cell.
    fn animate_eject(&mut self, id: ObjectId, target: glam::Vec3, on_complete: Completion) {
        debug!(?id, "queueing ejection animation");
        self.pending.push(Animation::new(id, target, on_complete));
        let src = self.objects[id.0].loc;
        self.occupancy.clear_if(&src, id);
    }

    /// Advances every pending animation by one tick, dispatching each
    /// completed motion back into the rule engine in enqueue order. A
    /// restart discards the whole queue without dispatching anything.
    pub fn update(&mut self, time_delta: f32) {
        if self.reset_pending {
            self.reset_pending = false;
            self.pending.clear();
        }

        let pending = std::mem::take(&mut self.pending);
        for anim in pending {
            if self.reset_pending {
                continue;
            }
            let obj = &mut self.objects[anim.id.0];
            if advance_position(&mut obj.pos, anim.target, time_delta) {
                self.pending.push(anim);
            } else {
                self.dispatch(anim.on_complete);
            }
        }
    }

    fn dispatch(&mut self, completion: Completion) {
        match completion {
            Completion::None => {}
            Completion::Settle { id } => self.after_move(id),
            Completion::SettleAndRelease { id, vacated } => {
                self.move_away_from(vacated);
                self.after_move(id);
            }
            Completion::SettleThenDrop { id, drop } => {
                self.after_move(id);
                for (j, b) in drop.iter().enumerate() {
                    self.fall(*b, j == 0);
                }
            }
            Completion::Land {
                id,
                floors,
                play_sound,
            } => {
                if play_sound {
                    self.after_fall_sound(id, floors);
                }
                self.after_new_floor(id);
            }
            Completion::Ejected { id } => {
                debug!(?id, "done falling out of the game");
                self.events.push(GameEvent::ObjectRemoved { id });
                if id == self.gopher {
                    self.restart(true);
                }
            }
            Completion::AscentDone { id: _ } => {
                self.events.push(GameEvent::StopSound {
                    cue: SoundCue::ElevatorUp,
                });
                self.animating = false;
            }
            Completion::DescentDone { id: _ } => {
                self.events.push(GameEvent::StopSound {
                    cue: SoundCue::ElevatorDown,
                });
            }
        }
    }

    fn move_gopher_to(&mut self, dest: GridLoc) {
        self.steps += 1;
        self.animating = true;

        // Walk onto support, or start falling right away.
        if self.occupancy.get(&dest.below()).is_none() {
            self.sound(SoundCue::GopherFallStart, None);
        } else {
            self.sound(SoundCue::Walk, None);
        }

        let vacated = self.objects[self.gopher.0].loc;
        self.animate(
            self.gopher,
            dest,
            Completion::SettleAndRelease {
                id: self.gopher,
                vacated,
            },
        );
    }

    fn after_move(&mut self, id: ObjectId) {
        debug!("after move");
        self.animating = false;
        let below = self.objects[id.0].loc.below();
        if self.occupancy.get(&below).is_none() {
            self.fall(id, true);
        } else {
            self.after_new_floor(id);
        }
    }

    /// Settlement checks once an object rests on a new cell: ride an
    /// elevator beneath it, or activate a pad it landed on.
    fn after_new_floor(&mut self, id: ObjectId) {
        debug!("after new floor");
        self.animating = false;
        let loc = self.objects[id.0].loc;
        match self.occupancy.get(&loc.below()) {
            Some(b) if self.is_elevator(b) => self.elevate(b),
            _ => {
                if self.objects[id.0].is_box() && self.layout.is_pad(&loc) {
                    self.box_on_pad(id, true);
                }
            }
        }
    }

    fn after_fall_sound(&mut self, id: ObjectId, floors: i32) {
        let is_gopher = self.objects[id.0].is_gopher();
        let is_box = self.objects[id.0].is_box();
        let below = self.occupancy.get(&self.objects[id.0].loc.below());
        let landed_on_gopher = below.is_some_and(|b| self.objects[b.0].is_gopher());

        if is_gopher && floors >= 1 {
            self.sound(SoundCue::GopherFallEnd, None);
        } else if is_box {
            if landed_on_gopher {
                // Collision outcome only; the gopher stays in play.
                self.sound(SoundCue::GopherHurt, None);
            } else {
                self.sound(SoundCue::BoxFallEnd, Some(id));
            }
        }
    }

    /// Resolves gravity for one object: scan down to the first obstruction
    /// and animate onto it, or eject out of the game at floor zero.
    fn fall(&mut self, id: ObjectId, play_sound: bool) {
        debug!(?id, "fall");
        self.animating = true;

        if play_sound && self.objects[id.0].is_box() {
            self.sound(SoundCue::BoxFallStart, Some(id));
        }

        let start = self.objects[id.0].loc;
        let landing = self.pos_after_fall_from(start);
        let floors = start.y - landing.y;

        if landing.y == 0 {
            debug!(?id, "falling out of the game");
            if id == self.gopher {
                self.locked = true;
            }
            self.sound(SoundCue::LevelFail, None);
            let mut target = landing.vec3();
            target.y = EJECT_FALL_FLOOR;
            self.animate_eject(id, target, Completion::Ejected { id });
        } else {
            self.animate(
                id,
                landing,
                Completion::Land {
                    id,
                    floors,
                    play_sound,
                },
            );
        }
    }

    /// Lowest empty slot directly above the first obstruction below `pos`,
    /// or floor zero if the whole column below is clear.
    fn pos_after_fall_from(&self, pos: GridLoc) -> GridLoc {
        let mut p = pos.below();
        while p.y >= 0 && self.occupancy.get(&p).is_none() {
            p.y -= 1;
        }
        p.y += 1;
        p
    }

    /// Pushes the vertical stack rooted at `first` one cell horizontally
    /// toward `dest`. Stack members whose own destination is blocked form
    /// a barrier: they do not move, they fall once the support below them
    /// has moved away.
    fn push_chain(&mut self, first: ObjectId, dest: GridLoc) {
        debug!("push chain");
        self.sound(SoundCue::BoxPush, Some(first));

        // Leaving a pad is decided on pre-move occupancy.
        let first_loc = self.objects[first.0].loc;
        if self.objects[first.0].is_box()
            && self.layout.is_pad(&first_loc)
            && !self.layout.is_pad(&dest)
        {
            self.box_off_pad(first, true);
        }

        let mut to_move = Vec::new();
        let mut to_fall = Vec::new();
        let mut found_barrier = false;

        let mut cur = Some(first);
        let mut dest = dest;
        while let Some(id) = cur {
            if !self.objects[id.0].pushable() {
                break;
            }
            if !found_barrier && self.occupancy.get(&dest).is_none() {
                to_move.push(id);
            } else {
                found_barrier = true;
                to_fall.push(id);
            }
            cur = self.occupancy.get(&self.objects[id.0].loc.above());
            dest.y += 1;
        }

        for (i, id) in to_move.iter().enumerate() {
            let own = self.objects[id.0].loc;
            let target = GridLoc::new(dest.z, dest.x, own.y);
            let completion = if i == 0 {
                Completion::SettleThenDrop {
                    id: *id,
                    drop: to_fall.clone(),
                }
            } else {
                Completion::Settle { id: *id }
            };
            self.animate(*id, target, completion);
        }
    }

    /// Side effects of a cell becoming empty: an elevator below it may
    /// auto-lower, and anything stacked above it loses support.
    fn move_away_from(&mut self, pos: GridLoc) {
        debug!(?pos, "vacated cell side effects");

        if let Some(b) = self.occupancy.get(&pos.below()) {
            if self.is_elevator(b) {
                debug!("stepped off an elevator");
                self.lower_elevator(b);
            }
        }

        if let Some(c) = self.occupancy.get(&pos.above()) {
            if self.objects[c.0].pushable() {
                debug!("stepped out from under a stack");
                let mut cur = Some(c);
                while let Some(id) = cur {
                    if !self.objects[id.0].pushable() {
                        break;
                    }
                    let above = self.occupancy.get(&self.objects[id.0].loc.above());
                    self.fall(id, true);
                    cur = above;
                }
            } else if self.is_elevator(c) && self.cargo(c).is_empty() {
                self.lower_elevator(c);
            }
        }
    }

    /// Contiguous run of pushable objects stacked directly on the elevator.
    fn cargo(&self, elev: ObjectId) -> Vec<ObjectId> {
        let mut cargo = Vec::new();
        let mut loc = self.objects[elev.0].loc.above();
        while let Some(id) = self.occupancy.get(&loc) {
            if !self.objects[id.0].pushable() {
                break;
            }
            cargo.push(id);
            loc = loc.above();
        }
        cargo
    }

    /// Raises the elevator and its cargo as far as range and headroom
    /// allow, in one simultaneous move. Zero ascent is a silent no-op.
    fn elevate(&mut self, elev: ObjectId) {
        let ObjectKind::Elevator { high, .. } = self.objects[elev.0].kind else {
            return;
        };
        let loc = self.objects[elev.0].loc;
        let max_elevation = high - loc.y;
        if max_elevation <= 0 {
            return;
        }

        let cargo = self.cargo(elev);
        let Some(&top) = cargo.last() else {
            return;
        };

        let mut ascent = 0;
        let mut probe = self.objects[top.0].loc.above();
        while ascent < max_elevation
            && self.occupancy.contains(&probe)
            && self.occupancy.get(&probe).is_none()
        {
            ascent += 1;
            probe = probe.above();
        }
        if ascent == 0 {
            return;
        }

        debug!(ascent, "elevating");
        self.sound(SoundCue::ElevatorUp, Some(elev));
        self.animating = true;

        // Highest cargo first so destination cells are free when written.
        for &c in cargo.iter().rev() {
            let up = self.objects[c.0].loc.offset(0, 0, ascent);
            self.animate(c, up, Completion::None);
        }
        let up = loc.offset(0, 0, ascent);
        self.animate(elev, up, Completion::AscentDone { id: elev });
    }

    /// Descends in one continuous move to the lowest empty floor within
    /// range. Triggered when the elevator's passenger or cargo departs.
    fn lower_elevator(&mut self, elev: ObjectId) {
        let ObjectKind::Elevator { low, .. } = self.objects[elev.0].kind else {
            return;
        };
        let loc = self.objects[elev.0].loc;
        let mut p = loc.below();
        while p.y >= low && self.occupancy.get(&p).is_none() {
            p.y -= 1;
        }
        p.y += 1;
        if p.y != loc.y {
            debug!("lowering elevator");
            self.sound(SoundCue::ElevatorDown, Some(elev));
            self.animate(elev, p, Completion::DescentDone { id: elev });
        }
    }

    /// Idempotent pad activation, checked against post-move occupancy.
    fn box_on_pad(&mut self, id: ObjectId, play_sound: bool) {
        if self.objects[id.0].on_pad {
            return;
        }
        debug!("box on pad");
        self.objects[id.0].on_pad = true;
        if play_sound {
            self.sound(SoundCue::BoxOnPad, Some(id));
        }
        self.events.push(GameEvent::BoxPadState { id, on_pad: true });
        if self.level_complete() {
            self.sound(SoundCue::LevelDone, None);
            self.events.push(GameEvent::LevelComplete);
        }
    }

    fn box_off_pad(&mut self, id: ObjectId, play_sound: bool) {
        if !self.objects[id.0].on_pad {
            return;
        }
        debug!("box off pad");
        self.objects[id.0].on_pad = false;
        if play_sound {
            self.sound(SoundCue::BoxOffPad, Some(id));
        }
        self.events.push(GameEvent::BoxPadState { id, on_pad: false });
    }

    /// Returns every tracked object to its layout-recorded initial cell
    /// and discards all pending animations without dispatching them.
    pub fn restart(&mut self, play_sound: bool) {
        debug!("restart");
        self.animating = false;
        self.reset_pending = true;
        self.locked = false;

        self.events.push(GameEvent::StopAllSounds);
        if play_sound && self.steps != 0 {
            self.sound(SoundCue::LevelRestart, None);
        }
        self.steps = 0;

        self.set_position(self.gopher, self.layout.gopher_start);

        let boxes = self.boxes.clone();
        for (i, b) in boxes.iter().enumerate() {
            self.box_off_pad(*b, false);
            let init = self.layout.box_starts[i];
            self.set_position(*b, init);
        }

        let elevators = self.elevators.clone();
        for e in elevators {
            let ObjectKind::Elevator { low, .. } = self.objects[e.0].kind else {
                continue;
            };
            let mut loc = self.objects[e.0].loc;
            loc.y = low;
            self.set_position(e, loc);
        }

        self.events.push(GameEvent::LevelRestarted);
    }

    /// Teleports an object: grid, logical location, and presentation
    /// position all snap to `dest`.
    fn set_position(&mut self, id: ObjectId, dest: GridLoc) {
        let src = self.objects[id.0].loc;
        self.occupancy.clear_if(&src, id);
        self.occupancy.set(&dest, Some(id));
        let obj = &mut self.objects[id.0];
        obj.loc = dest;
        obj.pos = dest.vec3();
    }
}
