use crate::components::{
    Billboard, ComponentBounds, ComponentProperties, Drawable3D, Ellipse, Label, Transform,
};
use crate::entity::EntityId;
use foundation::handles::Handle;

/// Column storage for globe entities.
///
/// Every component vector is indexed by `EntityId::index()`; entities are never
/// despawned individually, the owner rebuilds the world instead.
#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    transforms: Vec<Option<Transform>>,
    bounds: Vec<Option<ComponentBounds>>,
    properties: Vec<Option<ComponentProperties>>,
    drawables_3d: Vec<Option<Drawable3D>>,
    billboards: Vec<Option<Billboard>>,
    labels: Vec<Option<Label>>,
    ellipses: Vec<Option<Ellipse>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(Handle::new(self.next_index));
        self.next_index += 1;
        self.ensure_capacity(id.index() as usize);
        id
    }

    pub fn entity_count(&self) -> usize {
        self.next_index as usize
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.index() as usize);
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn set_bounds(&mut self, entity: EntityId, bounds: ComponentBounds) {
        self.ensure_capacity(entity.index() as usize);
        self.bounds[entity.index() as usize] = Some(bounds);
    }

    pub fn set_properties(&mut self, entity: EntityId, properties: ComponentProperties) {
        self.ensure_capacity(entity.index() as usize);
        self.properties[entity.index() as usize] = Some(properties);
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) {
        self.ensure_capacity(entity.index() as usize);
        self.drawables_3d[entity.index() as usize] = Some(drawable);
    }

    pub fn set_billboard(&mut self, entity: EntityId, billboard: Billboard) {
        self.ensure_capacity(entity.index() as usize);
        self.billboards[entity.index() as usize] = Some(billboard);
    }

    pub fn set_label(&mut self, entity: EntityId, label: Label) {
        self.ensure_capacity(entity.index() as usize);
        self.labels[entity.index() as usize] = Some(label);
    }

    pub fn set_ellipse(&mut self, entity: EntityId, ellipse: Ellipse) {
        self.ensure_capacity(entity.index() as usize);
        self.ellipses[entity.index() as usize] = Some(ellipse);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms
            .get(entity.index() as usize)
            .and_then(|t| *t)
    }

    pub fn bounds(&self, entity: EntityId) -> Option<ComponentBounds> {
        self.bounds.get(entity.index() as usize).and_then(|b| *b)
    }

    pub fn properties(&self, entity: EntityId) -> Option<&ComponentProperties> {
        self.properties
            .get(entity.index() as usize)
            .and_then(|p| p.as_ref())
    }

    /// Entities that carry pick bounds, in ascending index order.
    pub fn pickable(&self) -> Vec<(EntityId, ComponentBounds)> {
        self.bounds
            .iter()
            .enumerate()
            .filter_map(|(idx, b)| b.map(|b| (EntityId(Handle::new(idx as u32)), b)))
            .collect()
    }

    pub fn drawables_3d(&self) -> Vec<(EntityId, Transform, Drawable3D)> {
        self.collect_drawables(&self.drawables_3d)
    }

    pub fn billboards(&self) -> Vec<(EntityId, Transform, Billboard)> {
        self.collect_drawables(&self.billboards)
    }

    pub fn labels(&self) -> Vec<(EntityId, Transform, Label)> {
        self.collect_drawables(&self.labels)
    }

    pub fn ellipses(&self) -> Vec<(EntityId, Transform, Ellipse)> {
        self.collect_drawables(&self.ellipses)
    }

    fn collect_drawables<T: Clone>(
        &self,
        drawables: &[Option<T>],
    ) -> Vec<(EntityId, Transform, T)> {
        let mut out = Vec::new();
        for (idx, drawable) in drawables.iter().enumerate() {
            let Some(drawable) = drawable else { continue };
            let Some(transform) = self.transforms.get(idx).and_then(|t| *t) else {
                continue;
            };
            out.push((
                EntityId(Handle::new(idx as u32)),
                transform,
                drawable.clone(),
            ));
        }
        out
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let new_len = idx + 1;
            self.transforms.resize(new_len, None);
            self.bounds.resize(new_len, None);
            self.properties.resize(new_len, None);
            self.drawables_3d.resize(new_len, None);
            self.billboards.resize(new_len, None);
            self.labels.resize(new_len, None);
            self.ellipses.resize(new_len, None);
        }
    }
}
