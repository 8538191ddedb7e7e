use glam::{Mat4, Vec3};

/// Fixed look-at camera. The view matrix is rebuilt lazily after any change.
#[derive(Debug, Clone)]
pub struct Camera {
    pos: Vec3,
    target: Vec3,
    up: Vec3,

    mtx: Mat4,
    dirty: bool,
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                               Creation Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Camera {
    pub fn new() -> Self {
        Self {
            pos: Vec3::Z,
            target: Vec3::ZERO,
            up: Vec3::Y,

            mtx: Mat4::IDENTITY,
            dirty: true,
        }
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self.dirty = true;
        self
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self.dirty = true;
        self
    }

    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up.normalize();
        self.dirty = true;
        self
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                              Get / Set Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[allow(dead_code)]
impl Camera {
    pub fn get_mtx(&mut self) -> Mat4 {
        if self.dirty {
            self.calc_mtx();
        }

        self.mtx
    }

    pub fn get_pos(&self) -> Vec3 {
        self.pos
    }

    pub fn get_front(&self) -> Vec3 {
        (self.target - self.pos).normalize()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                               Internal Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Camera {
    fn calc_mtx(&mut self) {
        self.mtx = Mat4::look_at_rh(self.pos, self.target, self.up);
        self.dirty = false;
    }
}
