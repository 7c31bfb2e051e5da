//! In-memory fake of the remote API for controller tests
//!
//! Implements every capability trait against mutexed maps, records the
//! command sequence, and fails scripted operations with queued errors.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use nimbus_api::*;
use nimbus_common::{Error, Result, TagMap};

#[derive(Default)]
pub struct FakeCloud {
    counter: AtomicUsize,
    calls: Mutex<Vec<String>>,
    failures: Mutex<BTreeMap<String, VecDeque<Error>>>,

    // Entity stores
    pub instances: Mutex<BTreeMap<String, Instance>>,
    pub volumes: Mutex<BTreeMap<String, Volume>>,
    pub root_volumes: Mutex<BTreeMap<String, Vec<Volume>>>,
    pub networks: Mutex<BTreeMap<String, Network>>,
    pub vpcs: Mutex<BTreeMap<String, Vpc>>,
    pub private_gateways: Mutex<BTreeMap<String, PrivateGateway>>,
    pub security_group_store: Mutex<BTreeMap<String, SecurityGroup>>,
    pub affinity_group_store: Mutex<BTreeMap<String, AffinityGroup>>,
    pub acl_lists: Mutex<BTreeMap<String, NetworkAclList>>,
    pub vpn_gateways: Mutex<BTreeMap<String, VpnCustomerGateway>>,
    pub public_ips: Mutex<Vec<PublicIpAddress>>,

    // Directory entities for the resolver
    pub zones: Mutex<Vec<Zone>>,
    pub templates: Mutex<Vec<Template>>,
    pub service_offerings: Mutex<Vec<ServiceOffering>>,
    pub disk_offerings: Mutex<Vec<DiskOffering>>,
    pub network_offerings: Mutex<Vec<NetworkOffering>>,
    pub vpc_offerings: Mutex<Vec<VpcOffering>>,
    pub projects: Mutex<Vec<Project>>,

    // Captured mutating requests
    pub deploys: Mutex<Vec<DeployInstanceParams>>,
    pub instance_updates: Mutex<Vec<UpdateInstanceParams>>,
    pub offering_changes: Mutex<Vec<(String, String)>>,
    pub vm_group_updates: Mutex<Vec<(String, Option<Vec<String>>, Option<Vec<String>>)>>,
    pub resizes: Mutex<Vec<ResizeVolumeParams>>,
    pub attaches: Mutex<Vec<(String, String, Option<i64>)>>,
    pub network_creates: Mutex<Vec<CreateNetworkParams>>,
    pub vpc_creates: Mutex<Vec<CreateVpcParams>>,
    pub vpc_updates: Mutex<Vec<UpdateVpcParams>>,
    pub acl_replaces: Mutex<Vec<(String, String)>>,
    pub associates: Mutex<Vec<AssociateIpParams>>,
    pub security_group_creates: Mutex<Vec<CreateSecurityGroupParams>>,
    pub affinity_group_creates: Mutex<Vec<CreateAffinityGroupParams>>,
    pub private_gateway_creates: Mutex<Vec<CreatePrivateGatewayParams>>,
    pub vpn_updates: Mutex<Vec<UpdateVpnCustomerGatewayParams>>,
    pub tag_creates: Mutex<Vec<(String, String, TagMap)>>,
    pub tag_deletes: Mutex<Vec<(String, String, TagMap)>>,
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api(self: Arc<Self>) -> CloudApi {
        CloudApi::from_client(self)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Fail the next invocation of `op` with `err`.
    pub fn fail(&self, op: &str, err: Error) {
        self.failures
            .lock()
            .unwrap()
            .entry(op.to_string())
            .or_default()
            .push_back(err);
    }

    /// Fail the next `n` invocations of `op`.
    pub fn fail_times(&self, op: &str, n: usize, make: impl Fn() -> Error) {
        for _ in 0..n {
            self.fail(op, make());
        }
    }

    fn begin(&self, op: &str) -> Result<()> {
        self.calls.lock().unwrap().push(op.to_string());
        if let Some(queue) = self.failures.lock().unwrap().get_mut(op) {
            if let Some(err) = queue.pop_front() {
                return Err(err);
            }
        }
        Ok(())
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{prefix}-{n}")
    }
}

#[async_trait]
impl VirtualMachines for FakeCloud {
    async fn deploy(&self, params: &DeployInstanceParams) -> Result<Instance> {
        self.begin("deployInstance")?;
        self.deploys.lock().unwrap().push(params.clone());

        let instance = Instance {
            id: self.next_id("vm"),
            name: params.name.clone().unwrap_or_default(),
            display_name: params.display_name.clone().unwrap_or_default(),
            nics: vec![Nic {
                network_id: params
                    .network_ids
                    .as_ref()
                    .and_then(|ids| ids.first().cloned())
                    .unwrap_or_default(),
                ip_address: "10.1.1.10".to_string(),
                ..Default::default()
            }],
            password: "Vr2tZ8qL".to_string(),
            service_offering_id: params.service_offering_id.clone(),
            template_id: params.template_id.clone(),
            zone_id: params.zone_id.clone(),
            ..Default::default()
        };
        self.instances
            .lock()
            .unwrap()
            .insert(instance.id.clone(), instance.clone());
        Ok(instance)
    }

    async fn find(&self, id: &str, _project: Option<&str>) -> Result<Option<Instance>> {
        self.begin("listInstances")?;
        Ok(self.instances.lock().unwrap().get(id).cloned())
    }

    async fn start(&self, _id: &str) -> Result<()> {
        self.begin("startInstance")
    }

    async fn stop(&self, _id: &str) -> Result<()> {
        self.begin("stopInstance")
    }

    async fn update(&self, params: &UpdateInstanceParams) -> Result<()> {
        self.begin("updateInstance")?;
        self.instance_updates.lock().unwrap().push(params.clone());
        Ok(())
    }

    async fn change_service_offering(&self, id: &str, service_offering_id: &str) -> Result<()> {
        self.begin("changeServiceOffering")?;
        self.offering_changes
            .lock()
            .unwrap()
            .push((id.to_string(), service_offering_id.to_string()));
        if let Some(vm) = self.instances.lock().unwrap().get_mut(id) {
            vm.service_offering_id = service_offering_id.to_string();
        }
        Ok(())
    }

    async fn reset_ssh_key(&self, _params: &ResetSshKeyParams) -> Result<()> {
        self.begin("resetSshKey")
    }

    async fn destroy(&self, id: &str, _expunge: bool) -> Result<()> {
        self.begin("destroyInstance")?;
        self.instances.lock().unwrap().remove(id);
        Ok(())
    }
}

#[async_trait]
impl Volumes for FakeCloud {
    async fn create(&self, params: &CreateVolumeParams) -> Result<Volume> {
        self.begin("createVolume")?;
        let volume = Volume {
            id: self.next_id("vol"),
            name: params.name.clone(),
            size: params.size.unwrap_or(0) << 30,
            disk_offering_id: params.disk_offering_id.clone(),
            zone_id: params.zone_id.clone(),
            ..Default::default()
        };
        self.volumes
            .lock()
            .unwrap()
            .insert(volume.id.clone(), volume.clone());
        Ok(volume)
    }

    async fn find(&self, id: &str, _project: Option<&str>) -> Result<Option<Volume>> {
        self.begin("listVolumes")?;
        Ok(self.volumes.lock().unwrap().get(id).cloned())
    }

    async fn list_root(&self, virtual_machine_id: &str) -> Result<Vec<Volume>> {
        self.begin("listVolumes")?;
        Ok(self
            .root_volumes
            .lock()
            .unwrap()
            .get(virtual_machine_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn resize(&self, params: &ResizeVolumeParams) -> Result<Volume> {
        self.begin("resizeVolume")?;
        self.resizes.lock().unwrap().push(params.clone());

        let mut volumes = self.volumes.lock().unwrap();
        if let Some(volume) = volumes.get_mut(&params.id) {
            volume.disk_offering_id = params.disk_offering_id.clone();
            if let Some(size) = params.size {
                volume.size = size << 30;
            }
            return Ok(volume.clone());
        }
        Ok(Volume {
            id: params.id.clone(),
            ..Default::default()
        })
    }

    async fn attach(
        &self,
        id: &str,
        virtual_machine_id: &str,
        device_id: Option<i64>,
    ) -> Result<Volume> {
        self.begin("attachVolume")?;
        self.attaches.lock().unwrap().push((
            id.to_string(),
            virtual_machine_id.to_string(),
            device_id,
        ));

        let mut volumes = self.volumes.lock().unwrap();
        if let Some(volume) = volumes.get_mut(id) {
            volume.virtual_machine_id = virtual_machine_id.to_string();
            volume.device_id = device_id.unwrap_or(0);
            return Ok(volume.clone());
        }
        Ok(Volume {
            id: id.to_string(),
            virtual_machine_id: virtual_machine_id.to_string(),
            ..Default::default()
        })
    }

    async fn detach(&self, id: &str) -> Result<()> {
        self.begin("detachVolume")?;
        if let Some(volume) = self.volumes.lock().unwrap().get_mut(id) {
            volume.virtual_machine_id = String::new();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.begin("deleteVolume")?;
        self.volumes.lock().unwrap().remove(id);
        Ok(())
    }
}

#[async_trait]
impl Networks for FakeCloud {
    async fn create(&self, params: &CreateNetworkParams) -> Result<Network> {
        self.begin("createNetwork")?;
        self.network_creates.lock().unwrap().push(params.clone());

        let network = Network {
            id: self.next_id("net"),
            name: params.name.clone(),
            display_text: params.display_text.clone().unwrap_or_default(),
            gateway: params.gateway.clone().unwrap_or_default(),
            vpc_id: params.vpc_id.clone().unwrap_or_default(),
            acl_id: params.acl_id.clone().unwrap_or_default(),
            network_offering_id: params.network_offering_id.clone(),
            zone_id: params.zone_id.clone(),
            ..Default::default()
        };
        self.networks
            .lock()
            .unwrap()
            .insert(network.id.clone(), network.clone());
        Ok(network)
    }

    async fn find(&self, id: &str, _project: Option<&str>) -> Result<Option<Network>> {
        self.begin("listNetworks")?;
        Ok(self.networks.lock().unwrap().get(id).cloned())
    }

    async fn update(&self, _params: &UpdateNetworkParams) -> Result<()> {
        self.begin("updateNetwork")
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.begin("deleteNetwork")?;
        self.networks.lock().unwrap().remove(id);
        Ok(())
    }
}

#[async_trait]
impl NetworkOfferings for FakeCloud {
    async fn find(&self, id: &str) -> Result<Option<NetworkOffering>> {
        self.begin("listNetworkOfferings")?;
        Ok(self
            .network_offerings
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn list_by_name(&self, name: &str) -> Result<Vec<NetworkOffering>> {
        self.begin("listNetworkOfferings")?;
        Ok(self
            .network_offerings
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Vpcs for FakeCloud {
    async fn create(&self, params: &CreateVpcParams) -> Result<Vpc> {
        self.begin("createVpc")?;
        self.vpc_creates.lock().unwrap().push(params.clone());

        let vpc = Vpc {
            id: self.next_id("vpc"),
            name: params.name.clone(),
            display_text: params.display_text.clone(),
            cidr: params.cidr.clone(),
            vpc_offering_id: params.vpc_offering_id.clone(),
            zone_id: params.zone_id.clone(),
            ..Default::default()
        };
        self.vpcs
            .lock()
            .unwrap()
            .insert(vpc.id.clone(), vpc.clone());
        Ok(vpc)
    }

    async fn find(&self, id: &str, _project: Option<&str>) -> Result<Option<Vpc>> {
        self.begin("listVpcs")?;
        Ok(self.vpcs.lock().unwrap().get(id).cloned())
    }

    async fn update(&self, params: &UpdateVpcParams) -> Result<()> {
        self.begin("updateVpc")?;
        self.vpc_updates.lock().unwrap().push(params.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.begin("deleteVpc")?;
        self.vpcs.lock().unwrap().remove(id);
        Ok(())
    }
}

#[async_trait]
impl VpcOfferings for FakeCloud {
    async fn find(&self, id: &str) -> Result<Option<VpcOffering>> {
        self.begin("listVpcOfferings")?;
        Ok(self
            .vpc_offerings
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn list_by_name(&self, name: &str) -> Result<Vec<VpcOffering>> {
        self.begin("listVpcOfferings")?;
        Ok(self
            .vpc_offerings
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PrivateGateways for FakeCloud {
    async fn create(&self, params: &CreatePrivateGatewayParams) -> Result<PrivateGateway> {
        self.begin("createPrivateGateway")?;
        self.private_gateway_creates
            .lock()
            .unwrap()
            .push(params.clone());

        let gateway = PrivateGateway {
            id: self.next_id("pgw"),
            gateway: params.gateway.clone(),
            ip_address: params.ip_address.clone(),
            netmask: params.netmask.clone(),
            vlan: params.vlan.clone(),
            acl_id: params.acl_id.clone().unwrap_or_default(),
            vpc_id: params.vpc_id.clone(),
        };
        self.private_gateways
            .lock()
            .unwrap()
            .insert(gateway.id.clone(), gateway.clone());
        Ok(gateway)
    }

    async fn find(&self, id: &str) -> Result<Option<PrivateGateway>> {
        self.begin("listPrivateGateways")?;
        Ok(self.private_gateways.lock().unwrap().get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.begin("deletePrivateGateway")?;
        self.private_gateways.lock().unwrap().remove(id);
        Ok(())
    }
}

#[async_trait]
impl SecurityGroups for FakeCloud {
    async fn create(&self, params: &CreateSecurityGroupParams) -> Result<SecurityGroup> {
        self.begin("createSecurityGroup")?;
        self.security_group_creates
            .lock()
            .unwrap()
            .push(params.clone());

        let group = SecurityGroup {
            id: self.next_id("sg"),
            name: params.name.clone(),
            description: params.description.clone(),
            ..Default::default()
        };
        self.security_group_store
            .lock()
            .unwrap()
            .insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn find(&self, id: &str, _project: Option<&str>) -> Result<Option<SecurityGroup>> {
        self.begin("listSecurityGroups")?;
        Ok(self.security_group_store.lock().unwrap().get(id).cloned())
    }

    async fn delete(&self, id: &str, _project_id: Option<&str>) -> Result<()> {
        self.begin("deleteSecurityGroup")?;
        self.security_group_store.lock().unwrap().remove(id);
        Ok(())
    }
}

#[async_trait]
impl AffinityGroups for FakeCloud {
    async fn create(&self, params: &CreateAffinityGroupParams) -> Result<AffinityGroup> {
        self.begin("createAffinityGroup")?;
        self.affinity_group_creates
            .lock()
            .unwrap()
            .push(params.clone());

        let group = AffinityGroup {
            id: self.next_id("ag"),
            name: params.name.clone(),
            description: params.description.clone(),
            group_type: params.group_type.clone(),
        };
        self.affinity_group_store
            .lock()
            .unwrap()
            .insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn find(&self, id: &str, _project: Option<&str>) -> Result<Option<AffinityGroup>> {
        self.begin("listAffinityGroups")?;
        Ok(self.affinity_group_store.lock().unwrap().get(id).cloned())
    }

    async fn delete(&self, id: &str, _project_id: Option<&str>) -> Result<()> {
        self.begin("deleteAffinityGroup")?;
        self.affinity_group_store.lock().unwrap().remove(id);
        Ok(())
    }

    async fn update_vm_groups(
        &self,
        virtual_machine_id: &str,
        ids: Option<&[String]>,
        names: Option<&[String]>,
    ) -> Result<()> {
        self.begin("updateVmAffinityGroups")?;
        self.vm_group_updates.lock().unwrap().push((
            virtual_machine_id.to_string(),
            ids.map(<[String]>::to_vec),
            names.map(<[String]>::to_vec),
        ));
        Ok(())
    }
}

#[async_trait]
impl NetworkAcls for FakeCloud {
    async fn create(&self, params: &CreateAclListParams) -> Result<NetworkAclList> {
        self.begin("createNetworkAclList")?;
        let acl = NetworkAclList {
            id: self.next_id("acl"),
            name: params.name.clone(),
            description: params.description.clone(),
            vpc_id: params.vpc_id.clone(),
        };
        self.acl_lists
            .lock()
            .unwrap()
            .insert(acl.id.clone(), acl.clone());
        Ok(acl)
    }

    async fn find(&self, id: &str, _project: Option<&str>) -> Result<Option<NetworkAclList>> {
        self.begin("listNetworkAclLists")?;
        Ok(self.acl_lists.lock().unwrap().get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.begin("deleteNetworkAclList")?;
        self.acl_lists.lock().unwrap().remove(id);
        Ok(())
    }

    async fn replace(&self, acl_id: &str, network_id: &str) -> Result<()> {
        self.begin("replaceNetworkAclList")?;
        self.acl_replaces
            .lock()
            .unwrap()
            .push((acl_id.to_string(), network_id.to_string()));
        Ok(())
    }
}

#[async_trait]
impl Addresses for FakeCloud {
    async fn associate(&self, params: &AssociateIpParams) -> Result<PublicIpAddress> {
        self.begin("associateIpAddress")?;
        self.associates.lock().unwrap().push(params.clone());

        let ip = PublicIpAddress {
            id: self.next_id("ip"),
            ip_address: "203.0.113.10".to_string(),
            associated_network_id: params.network_id.clone().unwrap_or_default(),
            vpc_id: params.vpc_id.clone().unwrap_or_default(),
            is_source_nat: true,
        };
        self.public_ips.lock().unwrap().push(ip.clone());
        Ok(ip)
    }

    async fn find(&self, id: &str, _project: Option<&str>) -> Result<Option<PublicIpAddress>> {
        self.begin("listPublicIpAddresses")?;
        Ok(self
            .public_ips
            .lock()
            .unwrap()
            .iter()
            .find(|ip| ip.id == id)
            .cloned())
    }

    async fn list(&self, params: &ListPublicIpsParams) -> Result<Vec<PublicIpAddress>> {
        self.begin("listPublicIpAddresses")?;
        Ok(self
            .public_ips
            .lock()
            .unwrap()
            .iter()
            .filter(|ip| {
                params.id.as_ref().map_or(true, |id| &ip.id == id)
                    && params
                        .network_id
                        .as_ref()
                        .map_or(true, |n| &ip.associated_network_id == n)
                    && params.vpc_id.as_ref().map_or(true, |v| &ip.vpc_id == v)
                    && params
                        .is_source_nat
                        .map_or(true, |s| ip.is_source_nat == s)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl VpnGateways for FakeCloud {
    async fn create(&self, params: &CreateVpnCustomerGatewayParams) -> Result<VpnCustomerGateway> {
        self.begin("createVpnCustomerGateway")?;
        let gateway = VpnCustomerGateway {
            id: self.next_id("vcg"),
            name: params.name.clone().unwrap_or_default(),
            cidr_list: params.cidr_list.clone(),
            esp_policy: params.esp_policy.clone(),
            gateway: params.gateway.clone(),
            ike_policy: params.ike_policy.clone(),
            ipsec_psk: params.ipsec_psk.clone(),
            dpd: params.dpd.unwrap_or(false),
            esp_lifetime: params.esp_lifetime.unwrap_or(0),
            ike_lifetime: params.ike_lifetime.unwrap_or(0),
            ..Default::default()
        };
        self.vpn_gateways
            .lock()
            .unwrap()
            .insert(gateway.id.clone(), gateway.clone());
        Ok(gateway)
    }

    async fn find(&self, id: &str) -> Result<Option<VpnCustomerGateway>> {
        self.begin("listVpnCustomerGateways")?;
        Ok(self.vpn_gateways.lock().unwrap().get(id).cloned())
    }

    async fn update(&self, params: &UpdateVpnCustomerGatewayParams) -> Result<()> {
        self.begin("updateVpnCustomerGateway")?;
        self.vpn_updates.lock().unwrap().push(params.clone());

        if let Some(gateway) = self.vpn_gateways.lock().unwrap().get_mut(&params.id) {
            gateway.cidr_list = params.cidr_list.clone();
            gateway.esp_policy = params.esp_policy.clone();
            gateway.gateway = params.gateway.clone();
            gateway.ike_policy = params.ike_policy.clone();
            gateway.ipsec_psk = params.ipsec_psk.clone();
            if let Some(name) = &params.name {
                gateway.name = name.clone();
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.begin("deleteVpnCustomerGateway")?;
        self.vpn_gateways.lock().unwrap().remove(id);
        Ok(())
    }
}

#[async_trait]
impl ResourceTags for FakeCloud {
    async fn create(&self, resource_type: &str, resource_id: &str, tags: &TagMap) -> Result<()> {
        self.begin("createTags")?;
        self.tag_creates.lock().unwrap().push((
            resource_type.to_string(),
            resource_id.to_string(),
            tags.clone(),
        ));
        Ok(())
    }

    async fn delete(&self, resource_type: &str, resource_id: &str, tags: &TagMap) -> Result<()> {
        self.begin("deleteTags")?;
        self.tag_deletes.lock().unwrap().push((
            resource_type.to_string(),
            resource_id.to_string(),
            tags.clone(),
        ));
        Ok(())
    }
}

#[async_trait]
impl Zones for FakeCloud {
    async fn find(&self, id: &str) -> Result<Option<Zone>> {
        self.begin("listZones")?;
        Ok(self
            .zones
            .lock()
            .unwrap()
            .iter()
            .find(|z| z.id == id)
            .cloned())
    }

    async fn list_by_name(&self, name: &str) -> Result<Vec<Zone>> {
        self.begin("listZones")?;
        Ok(self
            .zones
            .lock()
            .unwrap()
            .iter()
            .filter(|z| z.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Templates for FakeCloud {
    async fn list_by_name(&self, zone_id: &str, name: &str) -> Result<Vec<Template>> {
        self.begin("listTemplates")?;
        Ok(self
            .templates
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.zone_id == zone_id && t.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ServiceOfferings for FakeCloud {
    async fn list_by_name(&self, name: &str) -> Result<Vec<ServiceOffering>> {
        self.begin("listServiceOfferings")?;
        Ok(self
            .service_offerings
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DiskOfferings for FakeCloud {
    async fn list_by_name(&self, name: &str) -> Result<Vec<DiskOffering>> {
        self.begin("listDiskOfferings")?;
        Ok(self
            .disk_offerings
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Projects for FakeCloud {
    async fn list_by_name(&self, name: &str) -> Result<Vec<Project>> {
        self.begin("listProjects")?;
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect())
    }
}
