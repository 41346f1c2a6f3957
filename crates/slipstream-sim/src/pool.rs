//! Generic reuse pool for transient entities.
//!
//! Instances stay in the hecs world for their whole life. A handed-out
//! instance carries the [`Active`] marker; a parked one keeps its components
//! but loses the marker, so systems that query `&Active` never see it.
//!
//! The free lists are only touched inside [`EntityPool::acquire`] and
//! [`EntityPool::release`]. Every handed-out instance is tracked, so a
//! release is accepted exactly once per acquire.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicU32, Ordering};

use hecs::{Entity, World};
use tracing::{debug, warn};

use slipstream_core::config::PoolConfig;

static NEXT_POOL_ID: AtomicU32 = AtomicU32::new(0);

/// Identity of a pool, stamped on every instance it builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId(u32);

/// Marker component: the instance is handed out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Active;

/// Pool-return metadata attached to an instance on first construction.
#[derive(Debug, Clone, Copy)]
pub struct PoolMember<K> {
    pub pool: PoolId,
    pub key: K,
}

/// Pool misuse. The offending release is refused and pool state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("entity {0:?} was not built by a pool")]
    NotPooled(Entity),

    #[error("entity {0:?} is not handed out (double release?)")]
    AlreadyReleased(Entity),

    #[error("entity {entity:?} belongs to pool {owner:?}, not {pool:?}")]
    ForeignPool {
        entity: Entity,
        owner: PoolId,
        pool: PoolId,
    },

    #[error("entity {0:?} no longer exists")]
    Despawned(Entity),
}

/// Per-template construction and lifecycle callbacks.
pub trait PoolHooks<K> {
    /// Build a new instance. Runs once per instance.
    fn create(&mut self, world: &mut World, key: K) -> Entity;

    /// Put the instance into its fresh condition. Runs on every acquire and
    /// must not depend on how the instance was used before.
    fn activate(&mut self, world: &mut World, entity: Entity, key: K);

    /// Cleanup when the instance is handed back.
    fn deactivate(&mut self, _world: &mut World, _entity: Entity, _key: K) {}
}

/// Reuse pool keyed by template.
pub struct EntityPool<K, H> {
    id: PoolId,
    config: PoolConfig,
    hooks: H,
    free: HashMap<K, Vec<Entity>>,
    outstanding: BTreeSet<Entity>,
    created: usize,
}

impl<K, H> EntityPool<K, H>
where
    K: Copy + Eq + Hash + Debug + Send + Sync + 'static,
    H: PoolHooks<K>,
{
    pub fn new(config: PoolConfig, hooks: H) -> Self {
        Self {
            id: PoolId(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed)),
            config,
            hooks,
            free: HashMap::new(),
            outstanding: BTreeSet::new(),
            created: 0,
        }
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Hand out an instance of `key`, reusing a parked one when available.
    pub fn acquire(&mut self, world: &mut World, key: K) -> Entity {
        let entity = match self.pop_free(world, key) {
            Some(entity) => entity,
            None => {
                let entity = self.hooks.create(world, key);
                let _ = world.insert_one(
                    entity,
                    PoolMember {
                        pool: self.id,
                        key,
                    },
                );
                self.created += 1;
                debug!(?key, created = self.created, "pool built a new instance");
                entity
            }
        };

        let _ = world.insert_one(entity, Active);
        self.hooks.activate(world, entity, key);
        self.outstanding.insert(entity);
        entity
    }

    /// Hand an instance back. Misuse is reported and refused.
    pub fn release(&mut self, world: &mut World, entity: Entity) -> Result<(), PoolError> {
        let key = match self.check_release(world, entity) {
            Ok(key) => key,
            Err(err) => {
                if matches!(err, PoolError::Despawned(_)) {
                    self.outstanding.remove(&entity);
                }
                warn!(error = %err, "rejected pool release");
                return Err(err);
            }
        };

        self.outstanding.remove(&entity);
        self.hooks.deactivate(world, entity, key);
        let _ = world.remove_one::<Active>(entity);

        let capacity = self.config.default_capacity;
        let free = self
            .free
            .entry(key)
            .or_insert_with(|| Vec::with_capacity(capacity));
        if free.len() >= self.config.max_size {
            let _ = world.despawn(entity);
            debug!(?key, max_size = self.config.max_size, "pool full, destroyed instance");
        } else {
            free.push(entity);
        }
        Ok(())
    }

    /// Release every handed-out instance. Returns how many were parked or destroyed.
    pub fn release_all(&mut self, world: &mut World) -> usize {
        let outstanding: Vec<Entity> = self.outstanding.iter().copied().collect();
        outstanding
            .into_iter()
            .filter(|&entity| self.release(world, entity).is_ok())
            .count()
    }

    /// Whether `entity` is currently handed out by this pool.
    pub fn is_outstanding(&self, entity: Entity) -> bool {
        self.outstanding.contains(&entity)
    }

    pub fn outstanding_count(&self) -> usize {
        self.outstanding.len()
    }

    /// Parked instances of `key`.
    pub fn parked_count(&self, key: K) -> usize {
        self.free.get(&key).map_or(0, Vec::len)
    }

    /// Instances built over the pool's lifetime.
    pub fn created_count(&self) -> usize {
        self.created
    }

    fn check_release(&self, world: &World, entity: Entity) -> Result<K, PoolError> {
        if !world.contains(entity) {
            return Err(PoolError::Despawned(entity));
        }
        let member = world
            .get::<&PoolMember<K>>(entity)
            .map(|member| *member)
            .map_err(|_| PoolError::NotPooled(entity))?;
        if member.pool != self.id {
            return Err(PoolError::ForeignPool {
                entity,
                owner: member.pool,
                pool: self.id,
            });
        }
        if !self.outstanding.contains(&entity) {
            return Err(PoolError::AlreadyReleased(entity));
        }
        Ok(member.key)
    }

    fn pop_free(&mut self, world: &World, key: K) -> Option<Entity> {
        let free = self.free.get_mut(&key)?;
        while let Some(entity) = free.pop() {
            if world.contains(entity) {
                return Some(entity);
            }
            warn!(?entity, "parked instance was despawned outside the pool, dropping it");
        }
        None
    }
}
